use std::sync::Arc;
use tracing::{debug, info};

use crate::cars::domain::{Car, CarCandidate, CarInput};
use crate::cars::repository::CarRepository;
use crate::errors::{BatchFailure, ServiceError};
use crate::storage::memory_map_store::MemoryMapStore;

/// 内存车辆存储：以 `id` 为键，保持插入顺序
#[derive(Clone, Default)]
pub struct CarStore {
    store: Arc<MemoryMapStore<String, Car>>,
}

impl CarStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 列出全部车辆（插入顺序）
    pub async fn list(&self) -> Vec<Car> {
        self.store.list().await
    }

    /// 根据 id 获取
    pub async fn get(&self, id: &str) -> Result<Car, ServiceError> {
        self.store
            .get(&id.to_string())
            .await
            .ok_or_else(|| ServiceError::not_found(id))
    }

    /// 创建单条记录：先校验，再检查 id 是否重复
    pub async fn create(&self, input: CarInput) -> Result<Car, ServiceError> {
        let car = input.into_car()?;
        let created = self
            .store
            .update_map(|map| {
                if map.contains_key(&car.id) {
                    return Err(ServiceError::DuplicateId(car.id.clone()));
                }
                map.insert(car.id.clone(), car.clone());
                Ok(car)
            })
            .await?;
        info!(id = %created.id, "car_created");
        Ok(created)
    }

    /// Batch create.
    ///
    /// Elements are handled in order under one write lock, each checked
    /// against the map as it stands after the earlier elements. Valid elements
    /// stay inserted even when the batch as a whole is rejected; the error
    /// carries only the failing elements, invalid ones echoed as submitted.
    pub async fn create_many(&self, candidates: Vec<CarCandidate>) -> Result<Vec<Car>, ServiceError> {
        let total = candidates.len();
        let (added, failures) = self
            .store
            .update_map(|map| {
                let mut added = Vec::new();
                let mut failures = Vec::new();
                for CarCandidate { raw, input } in candidates {
                    let car = match input.into_car() {
                        Ok(car) => car,
                        Err(_) => {
                            failures.push(BatchFailure::invalid(raw));
                            continue;
                        }
                    };
                    if map.contains_key(&car.id) {
                        failures.push(BatchFailure::duplicate(car.id));
                        continue;
                    }
                    map.insert(car.id.clone(), car.clone());
                    added.push(car);
                }
                Ok((added, failures))
            })
            .await?;

        info!(total, added = added.len(), failed = failures.len(), "car_batch_create");
        if failures.is_empty() {
            Ok(added)
        } else {
            Err(ServiceError::Batch(failures))
        }
    }

    /// 整体替换指定记录（不做字段合并）
    pub async fn update(&self, id: &str, input: CarInput) -> Result<Car, ServiceError> {
        let key = id.to_string();
        let updated = self
            .store
            .update_map(|map| {
                if !map.contains_key(&key) {
                    return Err(ServiceError::not_found(id));
                }
                let car = input.into_replacement(id)?;
                if car.id != key {
                    debug!(path_id = %key, body_id = %car.id, "car_update_id_mismatch");
                }
                map.insert(key.clone(), car.clone());
                Ok(car)
            })
            .await?;
        info!(id = %key, "car_updated");
        Ok(updated)
    }

    /// 删除指定记录
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if self.store.remove(&id.to_string()).await {
            info!(id = %id, "car_deleted");
            Ok(())
        } else {
            Err(ServiceError::not_found(id))
        }
    }
}

#[async_trait::async_trait]
impl CarRepository for CarStore {
    async fn list(&self) -> Vec<Car> { self.list().await }
    async fn get(&self, id: &str) -> Result<Car, ServiceError> { self.get(id).await }
    async fn create(&self, input: CarInput) -> Result<Car, ServiceError> { self.create(input).await }
    async fn create_many(&self, candidates: Vec<CarCandidate>) -> Result<Vec<Car>, ServiceError> { self.create_many(candidates).await }
    async fn update(&self, id: &str, input: CarInput) -> Result<Car, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: &str) -> Result<(), ServiceError> { self.delete(id).await }
}
