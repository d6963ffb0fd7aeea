use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct PlaceDoc {
    /// Latitude do local
    #[schema(example = 0)]
    pub lat: f64,
    /// Longitude do local
    #[schema(example = 0)]
    pub long: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarDoc {
    /// ID do carro
    #[schema(example = "001")]
    pub id: String,
    /// URL da imagem do carro
    #[schema(example = "https://image")]
    pub image_url: String,
    /// Ano do carro no formato '2020/2020'
    #[schema(example = "2020/2020")]
    pub year: String,
    /// Nome do carro
    #[schema(example = "Gaspar")]
    pub name: String,
    /// Placa do carro
    #[schema(example = "ABC-1234")]
    pub licence: String,
    pub place: PlaceDoc,
}

/// Um carro ou uma lista de carros
#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum CreateCarsDoc {
    One(CarDoc),
    Many(Vec<CarDoc>),
}

#[derive(ToSchema)]
pub struct CarEnvelopeDoc { pub id: String, pub value: CarDoc }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct BatchErrorsDoc {
    /// `{car, error}` ou `{id, error}` por elemento rejeitado
    #[schema(value_type = Vec<Object>)]
    pub errors: Vec<serde_json::Value>,
}

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API de Carros",
        version = "1.0.0",
        description = "API para gerenciar dados de carros."
    ),
    paths(
        crate::routes::health,
        crate::routes::cars::create,
        crate::routes::cars::list,
        crate::routes::cars::get,
        crate::routes::cars::update,
        crate::routes::cars::delete,
    ),
    components(
        schemas(
            HealthResponse,
            PlaceDoc,
            CarDoc,
            CreateCarsDoc,
            CarEnvelopeDoc,
            ErrorDoc,
            BatchErrorsDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "car")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_car_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/car"));
        assert!(paths.iter().any(|p| p.as_str() == "/car/{id}"));
        assert_eq!(doc.info.title, "API de Carros");
    }
}
