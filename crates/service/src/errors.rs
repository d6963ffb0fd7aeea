use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const MSG_INVALID_CAR: &str = "JSON inválido ou incompleto";
pub const MSG_DUPLICATE_ID: &str = "ID já existe";
pub const MSG_CAR_NOT_FOUND: &str = "Carro não encontrado";
pub const MSG_CAR_DELETED: &str = "Carro deletado com sucesso";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{}", MSG_INVALID_CAR)]
    Validation,
    #[error("{}", MSG_DUPLICATE_ID)]
    DuplicateId(String),
    #[error("{}", MSG_CAR_NOT_FOUND)]
    NotFound(String),
    #[error("batch create rejected {} element(s)", .0.len())]
    Batch(Vec<BatchFailure>),
}

impl ServiceError {
    pub fn not_found(id: &str) -> Self { Self::NotFound(id.to_string()) }
}

/// 批量创建中单个失败元素的描述，序列化形态与 HTTP 响应一致：
/// - 校验失败：`{ "car": <原始元素>, "error": "..." }`
/// - ID 重复：`{ "id": "...", "error": "..." }`
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum BatchFailure {
    Invalid { car: Value, error: String },
    Duplicate { id: String, error: String },
}

impl BatchFailure {
    pub fn invalid(car: Value) -> Self {
        Self::Invalid { car, error: MSG_INVALID_CAR.to_string() }
    }

    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::Duplicate { id: id.into(), error: MSG_DUPLICATE_ID.to_string() }
    }
}
