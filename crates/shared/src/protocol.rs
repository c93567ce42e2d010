use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{MenuItemId, OrderId, RestaurantId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub delivery_time_min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedRestaurant {
    #[serde(alias = "_id")]
    pub id: RestaurantId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub restaurant_id: RestaurantId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub vegetarian: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_name: String,
    pub address: String,
    pub restaurant_id: RestaurantId,
    pub items: Vec<OrderLine>,
}

/// Server acknowledgement of a placed order. Every field is optional on the wire: once the
/// backend has accepted an order the acknowledgement must not be lost to a sparse reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    #[serde(default, alias = "_id", deserialize_with = "null_as_default")]
    pub id: OrderId,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

/// Order as listed in the history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: OrderId,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<RestaurantId>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub status: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
