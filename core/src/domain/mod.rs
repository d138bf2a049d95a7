pub mod chat;
pub mod common;
pub mod food_analysis;
pub mod health;
pub mod models;
