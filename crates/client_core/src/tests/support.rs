//! In-memory backend shared by the session and shell tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use shared::{
    domain::{MenuItem, MenuItemId, OrderId, Restaurant, RestaurantId},
    protocol::{NewMenuItem, NewRestaurant, Order, OrderRequest, OrderResult},
};

use crate::{BackendGateway, GatewayError};

#[derive(Debug, Clone)]
pub(crate) enum Failure {
    Rejected(Option<&'static str>),
    Broken,
}

impl Failure {
    fn into_error(self) -> GatewayError {
        match self {
            Failure::Rejected(detail) => GatewayError::Rejected {
                status: 422,
                detail: detail.map(str::to_string),
            },
            Failure::Broken => {
                GatewayError::Decode(serde_json::from_str::<serde_json::Value>("{").unwrap_err())
            }
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub(crate) restaurants: Vec<Restaurant>,
    pub(crate) menus: HashMap<RestaurantId, Vec<MenuItem>>,
    pub(crate) orders: Vec<Order>,
    pub(crate) fail_restaurants: Option<Failure>,
    pub(crate) fail_menu: Option<Failure>,
    pub(crate) fail_orders: Option<Failure>,
    pub(crate) fail_create_restaurant: Option<Failure>,
    pub(crate) fail_create_menu_item: Option<Failure>,
    pub(crate) fail_create_order: Option<Failure>,
    pub(crate) submitted_orders: Vec<OrderRequest>,
    pub(crate) created_restaurants: Vec<NewRestaurant>,
    pub(crate) created_menu_items: Vec<NewMenuItem>,
    pub(crate) calls: Vec<&'static str>,
    pub(crate) next_id: u32,
}

impl FakeBackend {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-new-{}", self.next_id)
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeGateway {
    pub(crate) backend: Arc<Mutex<FakeBackend>>,
}

impl FakeGateway {
    pub(crate) fn with(configure: impl FnOnce(&mut FakeBackend)) -> Self {
        let gateway = Self::default();
        configure(&mut gateway.backend.lock().unwrap());
        gateway
    }

    pub(crate) fn update(&self, configure: impl FnOnce(&mut FakeBackend)) {
        configure(&mut self.backend.lock().unwrap());
    }

    pub(crate) fn calls(&self, name: &str) -> usize {
        self.backend
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| **call == name)
            .count()
    }

    pub(crate) fn submitted_orders(&self) -> Vec<OrderRequest> {
        self.backend.lock().unwrap().submitted_orders.clone()
    }
}

#[async_trait]
impl BackendGateway for FakeGateway {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, GatewayError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push("list_restaurants");
        if let Some(failure) = backend.fail_restaurants.clone() {
            return Err(failure.into_error());
        }
        Ok(backend.restaurants.clone())
    }

    async fn list_menu(&self, restaurant_id: &RestaurantId) -> Result<Vec<MenuItem>, GatewayError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push("list_menu");
        if let Some(failure) = backend.fail_menu.clone() {
            return Err(failure.into_error());
        }
        Ok(backend.menus.get(restaurant_id).cloned().unwrap_or_default())
    }

    async fn create_restaurant(
        &self,
        restaurant: &NewRestaurant,
    ) -> Result<RestaurantId, GatewayError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push("create_restaurant");
        if let Some(failure) = backend.fail_create_restaurant.clone() {
            return Err(failure.into_error());
        }
        let id = RestaurantId::new(backend.next_id("r"));
        backend.created_restaurants.push(restaurant.clone());
        backend.restaurants.push(Restaurant {
            id: id.clone(),
            name: restaurant.name.clone(),
            cuisine: restaurant.cuisine.clone(),
            rating: Some(restaurant.rating),
            delivery_time_min: Some(restaurant.delivery_time_min),
            image_url: restaurant.image_url.clone(),
        });
        Ok(id)
    }

    async fn create_menu_item(&self, item: &NewMenuItem) -> Result<(), GatewayError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push("create_menu_item");
        if let Some(failure) = backend.fail_create_menu_item.clone() {
            return Err(failure.into_error());
        }
        let id = MenuItemId::new(backend.next_id("m"));
        backend.created_menu_items.push(item.clone());
        backend
            .menus
            .entry(item.restaurant_id.clone())
            .or_default()
            .push(MenuItem {
                id,
                restaurant_id: item.restaurant_id.clone(),
                title: item.title.clone(),
                description: item.description.clone(),
                price: item.price,
                vegetarian: item.vegetarian,
                image_url: item.image_url.clone(),
            });
        Ok(())
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResult, GatewayError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push("create_order");
        if let Some(failure) = backend.fail_create_order.clone() {
            return Err(failure.into_error());
        }
        let menu = backend
            .menus
            .get(&order.restaurant_id)
            .cloned()
            .unwrap_or_default();
        let total: f64 = order
            .items
            .iter()
            .filter_map(|line| {
                menu.iter()
                    .find(|item| item.id == line.menu_item_id)
                    .map(|item| item.price * f64::from(line.quantity))
            })
            .sum();
        let id = OrderId::new(backend.next_id("o"));
        backend.submitted_orders.push(order.clone());
        backend.orders.push(Order {
            id: id.clone(),
            customer_name: order.customer_name.clone(),
            address: order.address.clone(),
            restaurant_id: Some(order.restaurant_id.clone()),
            items: order.items.clone(),
            total,
            status: "pending".to_string(),
        });
        Ok(OrderResult {
            id,
            total: Some(total),
            status: "pending".to_string(),
        })
    }

    async fn list_orders(&self) -> Result<Vec<Order>, GatewayError> {
        let mut backend = self.backend.lock().unwrap();
        backend.calls.push("list_orders");
        if let Some(failure) = backend.fail_orders.clone() {
            return Err(failure.into_error());
        }
        Ok(backend.orders.clone())
    }
}

pub(crate) fn restaurant(id: &str, name: &str) -> Restaurant {
    Restaurant {
        id: RestaurantId::new(id),
        name: name.to_string(),
        cuisine: "Burgers".to_string(),
        rating: Some(4.2),
        delivery_time_min: Some(20),
        image_url: None,
    }
}

pub(crate) fn menu_item(id: &str, restaurant_id: &str, title: &str, price: f64) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        restaurant_id: RestaurantId::new(restaurant_id),
        title: title.to_string(),
        description: None,
        price,
        vegetarian: false,
        image_url: None,
    }
}

/// Two restaurants; r-1 serves A (9.99) and B (5.00), r-2 serves C (12.50).
pub(crate) fn stocked_gateway() -> FakeGateway {
    FakeGateway::with(|backend| {
        backend.restaurants = vec![restaurant("r-1", "Blue Bites"), restaurant("r-2", "Green Bowl")];
        backend.menus.insert(
            RestaurantId::new("r-1"),
            vec![
                menu_item("a", "r-1", "Classic Burger", 9.99),
                menu_item("b", "r-1", "Loaded Fries", 5.0),
            ],
        );
        backend.menus.insert(
            RestaurantId::new("r-2"),
            vec![menu_item("c", "r-2", "Poke Bowl", 12.5)],
        );
    })
}
