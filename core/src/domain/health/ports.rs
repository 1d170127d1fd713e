use crate::domain::health::entities::CatalogHealthStatus;

pub trait HealthCheckService: Send + Sync {
    fn readiness(&self) -> CatalogHealthStatus;
}
