use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::errors::ServiceError;

/// 车辆位置：经纬度不做范围限制（0、负数、越界值均合法）
///
/// 保存为 JSON 数字原样，`0` 回显为 `0` 而不是 `0.0`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub lat: Number,
    pub long: Number,
}

/// 存储中的车辆记录
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    pub image_url: String,
    pub year: String,
    pub name: String,
    pub licence: String,
    pub place: Place,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaceInput {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lat: Option<Number>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub long: Option<Number>,
}

/// Candidate record as it arrives on the wire.
///
/// Every field is optional and a field of the wrong JSON type reads as absent,
/// so a malformed candidate always reaches [`CarInput::is_valid`] instead of
/// failing deserialization.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub licence: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub place: Option<PlaceInput>,
}

fn lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

impl CarInput {
    /// Read a candidate from an arbitrary JSON value; non-objects become an
    /// empty candidate.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Required-field check shared by create and update, `id` excluded.
    fn has_required_body(&self) -> bool {
        filled(&self.image_url)
            && filled(&self.year)
            && filled(&self.name)
            && filled(&self.licence)
            && self
                .place
                .as_ref()
                .is_some_and(|p| p.lat.is_some() && p.long.is_some())
    }

    /// 创建时的完整校验：所有必填字段存在且非空
    pub fn is_valid(&self) -> bool {
        filled(&self.id) && self.has_required_body()
    }

    /// 更新时的校验：路径参数提供主键，因此不检查 `id`
    pub fn is_valid_replacement(&self) -> bool {
        self.has_required_body()
    }

    /// Convert a validated candidate; `fallback_id` fills an absent `id`.
    fn build(self, fallback_id: Option<&str>) -> Result<Car, ServiceError> {
        let id = match (self.id, fallback_id) {
            (Some(id), _) => id,
            (None, Some(fallback)) => fallback.to_string(),
            (None, None) => return Err(ServiceError::Validation),
        };
        match (self.image_url, self.year, self.name, self.licence, self.place) {
            (
                Some(image_url),
                Some(year),
                Some(name),
                Some(licence),
                Some(PlaceInput { lat: Some(lat), long: Some(long) }),
            ) => Ok(Car { id, image_url, year, name, licence, place: Place { lat, long } }),
            _ => Err(ServiceError::Validation),
        }
    }

    /// Validate for create and turn into a stored record.
    pub fn into_car(self) -> Result<Car, ServiceError> {
        if !self.is_valid() {
            return Err(ServiceError::Validation);
        }
        self.build(None)
    }

    /// Validate for update. The body's own `id` is kept verbatim even when it
    /// differs from `path_id`; only an absent `id` is filled from the path.
    pub fn into_replacement(self, path_id: &str) -> Result<Car, ServiceError> {
        if !self.is_valid_replacement() {
            return Err(ServiceError::Validation);
        }
        self.build(Some(path_id))
    }
}

/// A batch element: the element exactly as submitted plus its parsed form.
///
/// Failure descriptors echo `raw`, so unknown fields, wrongly typed fields and
/// integer coordinates come back untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct CarCandidate {
    pub raw: Value,
    pub input: CarInput,
}

impl CarCandidate {
    pub fn from_value(raw: Value) -> Self {
        let input = CarInput::from_value(raw.clone());
        Self { raw, input }
    }
}

impl From<CarInput> for CarCandidate {
    fn from(input: CarInput) -> Self {
        let raw = serde_json::to_value(&input).unwrap_or(Value::Null);
        Self { raw, input }
    }
}

impl From<Car> for CarInput {
    fn from(car: Car) -> Self {
        Self {
            id: Some(car.id),
            image_url: Some(car.image_url),
            year: Some(car.year),
            name: Some(car.name),
            licence: Some(car.licence),
            place: Some(PlaceInput { lat: Some(car.place.lat), long: Some(car.place.long) }),
        }
    }
}
