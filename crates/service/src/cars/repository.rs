use async_trait::async_trait;

use crate::cars::domain::{Car, CarCandidate, CarInput};
use crate::errors::ServiceError;

/// Trait abstraction for car storage, so handlers can hold `Arc<dyn CarRepository>`.
#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn list(&self) -> Vec<Car>;
    async fn get(&self, id: &str) -> Result<Car, ServiceError>;
    async fn create(&self, input: CarInput) -> Result<Car, ServiceError>;
    async fn create_many(&self, candidates: Vec<CarCandidate>) -> Result<Vec<Car>, ServiceError>;
    async fn update(&self, id: &str, input: CarInput) -> Result<Car, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
