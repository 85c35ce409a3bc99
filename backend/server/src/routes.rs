use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    error::AppError,
    state::AppState,
    store::{FOOD_DESCRIPTION, FOOD_NAME, FOOD_REGION, FoodRecord, NewFood},
};

pub const GREETING: &str = "api jalan hehe";
pub const CREATED_MESSAGE: &str = "berhasil menambah data";

/// Fields of a create request, kept as raw JSON. A body that is not an object
/// carries no fields.
#[derive(Default, Debug)]
pub struct CreateFood {
    daerah: Option<Value>,
    makanan: Option<Value>,
    deskripsi: Option<Value>,
}

impl CreateFood {
    fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let parsed: Value = serde_json::from_slice(body).map_err(|_| AppError::MalformedPayload)?;
        let Value::Object(mut fields) = parsed else {
            return Ok(Self::default());
        };

        Ok(Self {
            daerah: fields.remove(FOOD_REGION),
            makanan: fields.remove(FOOD_NAME),
            deskripsi: fields.remove(FOOD_DESCRIPTION),
        })
    }

    fn validate(self) -> Result<NewFood, AppError> {
        match (self.daerah, self.makanan) {
            (Some(daerah), Some(makanan)) if is_truthy(&daerah) && is_truthy(&makanan) => {
                Ok(NewFood {
                    daerah,
                    makanan,
                    deskripsi: self.deskripsi,
                })
            }
            _ => Err(AppError::MissingFields),
        }
    }
}

/// Null, `false`, zero and the empty string are falsy; everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub async fn root_handler() -> &'static str {
    GREETING
}

pub async fn foods_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FoodRecord>>, AppError> {
    Ok(Json(state.store.list_foods().await?))
}

pub async fn region_handler(
    State(state): State<Arc<AppState>>,
    Path(daerah): Path<String>,
) -> Result<Json<Vec<FoodRecord>>, AppError> {
    Ok(Json(state.store.list_foods_by_region(&daerah).await?))
}

pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let food = CreateFood::from_body(&body)?.validate()?;

    info!("Adding {} from {}", food.makanan, food.daerah);
    let data = state.store.insert_food(food).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": CREATED_MESSAGE, "data": data })),
    ))
}
