//! # Supabase
//!
//! Production [`FoodStore`], talking to the project's PostgREST endpoint at `/rest/v1`.
//!
//! ## Requests
//! - Every request sends the key twice, as `apikey` and as a bearer token
//! - Filters are PostgREST operators in the query string, e.g. `daerah=eq.Bali`
//! - Inserts ask for `return=minimal`, so the store usually answers with an empty body
//!
//! ## Errors
//! PostgREST answers failures with `{code, details, hint, message}`. Only `message` is forwarded.
//!
//! ## Commands
//!
//! Same query as listing all foods.
//! ```sh
//! curl "$SUPABASE_URL/rest/v1/foods?select=*&order=id.asc" \
//!   -H "apikey: $SUPABASE_ANON_KEY" -H "Authorization: Bearer $SUPABASE_ANON_KEY"
//! ```
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::store::{FOOD_ID, FOOD_REGION, FOOD_TABLE, FoodRecord, FoodStore, NewFood, StoreError};

const API_KEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "prefer";
const RETURN_MINIMAL: &str = "return=minimal";

#[derive(Deserialize)]
struct PostgrestError {
    message: String,
}

pub struct SupabaseStore {
    client: Client,
    table_url: String,
}

impl SupabaseStore {
    pub fn new(supabase_url: &str, supabase_key: &str) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, secret_header(supabase_key.to_string())?);
        headers.insert(AUTHORIZATION, secret_header(format!("Bearer {supabase_key}"))?);

        let client = Client::builder().default_headers(headers).build()?;
        let table_url = format!(
            "{}/rest/v1/{FOOD_TABLE}",
            supabase_url.trim_end_matches('/')
        );

        Ok(Self { client, table_url })
    }

    async fn select(&self, request: RequestBuilder) -> Result<Vec<FoodRecord>, StoreError> {
        let response = check(request.send().await?).await?;
        let bytes = response.bytes().await?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl FoodStore for SupabaseStore {
    async fn list_foods(&self) -> Result<Vec<FoodRecord>, StoreError> {
        let order = format!("{FOOD_ID}.asc");

        self.select(
            self.client
                .get(&self.table_url)
                .query(&[("select", "*"), ("order", order.as_str())]),
        )
        .await
    }

    async fn list_foods_by_region(&self, daerah: &str) -> Result<Vec<FoodRecord>, StoreError> {
        let filter = format!("eq.{daerah}");

        self.select(
            self.client
                .get(&self.table_url)
                .query(&[("select", "*"), (FOOD_REGION, filter.as_str())]),
        )
        .await
    }

    async fn insert_food(&self, food: NewFood) -> Result<Value, StoreError> {
        let response = self
            .client
            .post(&self.table_url)
            .header(PREFER_HEADER, RETURN_MINIMAL)
            .json(&[food])
            .send()
            .await?;

        let bytes = check(response).await?.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

pub fn init_store(supabase_url: &str, supabase_key: &str) -> Result<Arc<SupabaseStore>, StoreError> {
    let store = SupabaseStore::new(supabase_url, supabase_key)?;
    debug!("Store client targeting {}", store.table_url);

    Ok(Arc::new(store))
}

fn secret_header(value: String) -> Result<HeaderValue, StoreError> {
    let mut header = HeaderValue::try_from(value)?;
    header.set_sensitive(true);

    Ok(header)
}

async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    Err(StoreError::Rejected {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<PostgrestError>(body) {
        return error.message;
    }

    let body = body.trim();
    if body.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Unknown store error")
            .to_string();
    }

    body.to_string()
}
