use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use common::types::Message;
use service::cars::{Car, CarCandidate, CarInput};
use service::errors::MSG_CAR_DELETED;

use crate::{errors::JsonApiError, routes::ServerState};

/// `GET /car/{id}` 的响应体
#[derive(Debug, Serialize)]
pub struct CarEnvelope {
    pub id: String,
    pub value: Car,
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, JsonApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "malformed car body");
            Err(JsonApiError::invalid_body())
        }
    }
}

#[utoipa::path(
    post, path = "/car", tag = "car",
    request_body = crate::openapi::CreateCarsDoc,
    responses(
        (status = 201, description = "Carro(s) adicionado(s) com sucesso"),
        (status = 400, description = "Erro de validação nos dados fornecidos", body = crate::openapi::BatchErrorsDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    match json_body(body)? {
        Value::Array(items) => {
            let candidates = items.into_iter().map(CarCandidate::from_value).collect::<Vec<_>>();
            let added = state.cars.create_many(candidates).await?;
            info!(count = added.len(), "created cars");
            Ok((StatusCode::CREATED, Json(added)).into_response())
        }
        single => {
            let car = state.cars.create(CarInput::from_value(single)).await?;
            info!(id = %car.id, "created car");
            Ok((StatusCode::CREATED, Json(car)).into_response())
        }
    }
}

#[utoipa::path(
    get, path = "/car", tag = "car",
    responses(
        (status = 200, description = "Lista de carros retornada com sucesso", body = [crate::openapi::CarDoc])
    )
)]
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Car>> {
    Json(state.cars.list().await)
}

#[utoipa::path(
    get, path = "/car/{id}", tag = "car",
    params(("id" = String, Path, description = "ID do carro")),
    responses(
        (status = 200, description = "Dados do carro retornados com sucesso", body = crate::openapi::CarEnvelopeDoc),
        (status = 404, description = "Carro não encontrado", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<CarEnvelope>, JsonApiError> {
    let value = state.cars.get(&id).await?;
    Ok(Json(CarEnvelope { id, value }))
}

// 成功时返回 201
#[utoipa::path(
    patch, path = "/car/{id}", tag = "car",
    params(("id" = String, Path, description = "ID do carro")),
    request_body = crate::openapi::CarDoc,
    responses(
        (status = 201, description = "Carro atualizado com sucesso", body = crate::openapi::CarDoc),
        (status = 400, description = "Erro de validação nos dados fornecidos", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Carro não encontrado", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Car>), JsonApiError> {
    // 不存在的 id 优先返回 404，即使请求体无法解析
    let parsed = json_body(body);
    let input = match parsed {
        Ok(value) => CarInput::from_value(value),
        Err(e) => {
            state.cars.get(&id).await?;
            return Err(e);
        }
    };
    let car = state.cars.update(&id, input).await?;
    info!(id = %id, "updated car");
    Ok((StatusCode::CREATED, Json(car)))
}

#[utoipa::path(
    delete, path = "/car/{id}", tag = "car",
    params(("id" = String, Path, description = "ID do carro")),
    responses(
        (status = 200, description = "Carro deletado com sucesso", body = crate::openapi::MessageDoc),
        (status = 404, description = "Carro não encontrado", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    state.cars.delete(&id).await?;
    info!(id = %id, "deleted car");
    Ok(Json(Message { message: MSG_CAR_DELETED.to_string() }))
}
