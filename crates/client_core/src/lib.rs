use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{MenuItem, Restaurant, RestaurantId},
    error::ApiError,
    protocol::{CreatedRestaurant, NewMenuItem, NewRestaurant, Order, OrderRequest, OrderResult},
};
use tracing::{debug, warn};

pub mod cart;
pub mod error;
pub mod forms;
mod seed;
pub mod session;
pub mod settings;
pub mod shell;
pub mod view;

pub use cart::{Cart, CartEntry};
pub use error::{GatewayError, SessionError, SettingsError};
pub use session::{MenuTicket, OrderingSession, SessionState, SessionVariant, SubmitPhase, Summary};
pub use settings::{load_settings, ClientSettings};

/// Backend operations the ordering session depends on.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, GatewayError>;
    async fn list_menu(&self, restaurant_id: &RestaurantId) -> Result<Vec<MenuItem>, GatewayError>;
    async fn create_restaurant(
        &self,
        restaurant: &NewRestaurant,
    ) -> Result<RestaurantId, GatewayError>;
    async fn create_menu_item(&self, item: &NewMenuItem) -> Result<(), GatewayError>;
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResult, GatewayError>;
    async fn list_orders(&self) -> Result<Vec<Order>, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GatewayError> {
        debug!(path, "GET");
        let response = self
            .http
            .get(format!("{}{path}", self.base_url))
            .send()
            .await?;
        let body = checked_body(response).await?;
        decode_list(path, &body)
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<Vec<u8>, GatewayError> {
        debug!(path, "POST");
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(payload)
            .send()
            .await?;
        checked_body(response).await
    }
}

async fn checked_body(response: Response) -> Result<Vec<u8>, GatewayError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(GatewayError::Rejected {
            status: status.as_u16(),
            detail: ApiError::detail_from_body(&body),
        });
    }
    Ok(body.to_vec())
}

/// Malformed JSON is an error. Well-formed JSON that is not an array reads as empty, and
/// entries that do not match `T` are skipped.
fn decode_list<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<Vec<T>, GatewayError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    let serde_json::Value::Array(entries) = value else {
        warn!(path, "expected a JSON array; treating response as empty");
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(path, index, error = %err, "skipping list entry that does not match schema");
                None
            }
        })
        .collect())
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, GatewayError> {
        self.get_list("/restaurants").await
    }

    async fn list_menu(&self, restaurant_id: &RestaurantId) -> Result<Vec<MenuItem>, GatewayError> {
        self.get_list(&format!("/restaurants/{restaurant_id}/menu"))
            .await
    }

    async fn create_restaurant(
        &self,
        restaurant: &NewRestaurant,
    ) -> Result<RestaurantId, GatewayError> {
        let body = self.post_json("/restaurants", restaurant).await?;
        let created: CreatedRestaurant = serde_json::from_slice(&body)?;
        Ok(created.id)
    }

    async fn create_menu_item(&self, item: &NewMenuItem) -> Result<(), GatewayError> {
        self.post_json("/menu", item).await?;
        Ok(())
    }

    /// Any 2xx means the backend holds the order, so an unreadable acknowledgement still
    /// counts as success.
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResult, GatewayError> {
        let body = self.post_json("/orders", order).await?;
        Ok(serde_json::from_slice(&body).unwrap_or_else(|err| {
            warn!(error = %err, "order accepted but acknowledgement unreadable");
            OrderResult::default()
        }))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, GatewayError> {
        self.get_list("/orders").await
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
