use std::future::Future;

use crate::domain::health::entities::HealthReport;

pub trait HealthCheckService: Send + Sync {
    fn health(&self) -> impl Future<Output = HealthReport> + Send;
}
