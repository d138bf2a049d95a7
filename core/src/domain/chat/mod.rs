pub mod entities;
pub mod ports;
pub mod prompt;
pub mod services;
pub mod stream;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use stream::{FragmentBridge, StreamEnvelope};
pub use value_objects::*;
