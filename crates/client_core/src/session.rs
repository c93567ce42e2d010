//! Ordering session: restaurant selection, cart, checkout and the dashboard's create flows.
//!
//! All state lives in [`SessionState`]; views read it through [`OrderingSession::state`] and
//! change it only through the session's operations.

use shared::{
    domain::{Customer, MenuItem, MenuItemId, Restaurant, RestaurantId},
    protocol::{Order, OrderRequest, OrderResult},
};
use tracing::{debug, info, warn};

use crate::{
    cart::Cart,
    error::{GatewayError, SessionError},
    forms::{MenuItemForm, RestaurantForm},
    seed, BackendGateway,
};

const LOAD_RESTAURANTS_FAILED: &str = "Failed to load restaurants";
const LOAD_MENU_FAILED: &str = "Failed to load menu";
const CREATE_RESTAURANT_FAILED: &str = "Failed to create restaurant";
const CREATE_MENU_ITEM_FAILED: &str = "Failed to add menu item";
const PLACE_ORDER_FAILED: &str = "Failed to place order";
const SEED_FAILED: &str = "Failed to seed data";
const NO_RESTAURANT_SELECTED: &str = "Select a restaurant first";
const MISSING_CUSTOMER: &str = "Please enter your name and address";
const EMPTY_CART: &str = "Your cart is empty";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionVariant {
    /// Customer ordering view.
    #[default]
    Storefront,
    /// Operator view; keeps a restaurant selected whenever one exists.
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Issued when a menu fetch starts. Only the ticket of the latest fetch is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTicket {
    restaurant_id: RestaurantId,
    generation: u64,
}

impl MenuTicket {
    pub fn restaurant_id(&self) -> &RestaurantId {
        &self.restaurant_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub restaurants: usize,
    pub menu_items: usize,
    pub orders: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub restaurants: Vec<Restaurant>,
    pub selected: Option<Restaurant>,
    pub menu: Vec<MenuItem>,
    pub orders: Vec<Order>,
    pub cart: Cart,
    pub customer: Customer,
    pub order_result: Option<OrderResult>,
    pub restaurant_form: RestaurantForm,
    pub menu_item_form: MenuItemForm,
    pub phase: SubmitPhase,
    pub loading: bool,
    /// Outcome of the most recent failed action, replaced by the next one.
    pub error: Option<String>,
}

pub struct OrderingSession<G> {
    gateway: G,
    variant: SessionVariant,
    state: SessionState,
    menu_generation: u64,
}

impl<G: BackendGateway> OrderingSession<G> {
    pub fn new(gateway: G, variant: SessionVariant) -> Self {
        Self {
            gateway,
            variant,
            state: SessionState::default(),
            menu_generation: 0,
        }
    }

    pub fn variant(&self) -> SessionVariant {
        self.variant
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn customer_mut(&mut self) -> &mut Customer {
        &mut self.state.customer
    }

    pub fn restaurant_form_mut(&mut self) -> &mut RestaurantForm {
        &mut self.state.restaurant_form
    }

    pub fn menu_item_form_mut(&mut self) -> &mut MenuItemForm {
        &mut self.state.menu_item_form
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    /// Looks a restaurant up by id, then by case-insensitive name.
    pub fn find_restaurant(&self, key: &str) -> Option<&Restaurant> {
        let restaurants = &self.state.restaurants;
        restaurants
            .iter()
            .find(|restaurant| restaurant.id.as_str() == key)
            .or_else(|| {
                restaurants
                    .iter()
                    .find(|restaurant| restaurant.name.eq_ignore_ascii_case(key))
            })
    }

    /// Looks a menu item up by id, then by case-insensitive title.
    pub fn find_menu_item(&self, key: &str) -> Option<&MenuItem> {
        let menu = &self.state.menu;
        menu.iter()
            .find(|item| item.id.as_str() == key)
            .or_else(|| menu.iter().find(|item| item.title.eq_ignore_ascii_case(key)))
    }

    pub async fn refresh_all(&mut self) -> Result<(), SessionError> {
        self.state.error = None;
        let restaurants = self.fetch_restaurants().await;
        self.fetch_orders().await;
        restaurants
    }

    /// Replaces the restaurant list. A selection that disappeared from the list is dropped
    /// together with its menu and cart; the dashboard then falls back to the first restaurant.
    pub async fn fetch_restaurants(&mut self) -> Result<(), SessionError> {
        self.state.loading = true;
        let restaurants = match self.gateway.list_restaurants().await {
            Ok(restaurants) => restaurants,
            Err(err) => {
                warn!(error = %err, "restaurant list fetch failed");
                return Err(self.fail(SessionError::Failed(LOAD_RESTAURANTS_FAILED.into())));
            }
        };
        debug!(count = restaurants.len(), "restaurant list loaded");
        self.state.restaurants = restaurants;
        self.state.loading = false;

        if let Some(selected_id) = self.selected_id() {
            match self
                .state
                .restaurants
                .iter()
                .find(|restaurant| restaurant.id == selected_id)
            {
                Some(fresh) => self.state.selected = Some(fresh.clone()),
                None => {
                    info!(restaurant_id = %selected_id, "selected restaurant no longer listed; clearing selection");
                    self.clear_selection();
                }
            }
        }

        if self.variant == SessionVariant::Dashboard && self.state.selected.is_none() {
            if let Some(first) = self.state.restaurants.first().cloned() {
                return self.select_restaurant(first).await;
            }
        }
        Ok(())
    }

    /// Order history is secondary; failures keep the previous list and are only logged.
    pub async fn fetch_orders(&mut self) {
        match self.gateway.list_orders().await {
            Ok(orders) => {
                debug!(count = orders.len(), "order history loaded");
                self.state.orders = orders;
            }
            Err(err) => warn!(error = %err, "order history refresh failed"),
        }
    }

    pub async fn select_restaurant(&mut self, restaurant: Restaurant) -> Result<(), SessionError> {
        let ticket = self.begin_select(restaurant);
        let menu = self.gateway.list_menu(ticket.restaurant_id()).await;
        self.apply_menu(ticket, menu).map(|_| ())
    }

    /// Switches the selection and resets everything scoped to the previous restaurant.
    /// The caller fetches the menu and hands the outcome to [`Self::apply_menu`].
    pub fn begin_select(&mut self, restaurant: Restaurant) -> MenuTicket {
        info!(restaurant_id = %restaurant.id, name = %restaurant.name, "restaurant selected");
        let ticket = self.next_menu_ticket(restaurant.id.clone());
        self.state.selected = Some(restaurant);
        self.state.menu.clear();
        self.state.cart.clear();
        self.state.order_result = None;
        self.state.phase = SubmitPhase::Idle;
        self.state.loading = true;
        ticket
    }

    /// Applies a menu response. Returns `Ok(false)` when a newer fetch has superseded it.
    pub fn apply_menu(
        &mut self,
        ticket: MenuTicket,
        menu: Result<Vec<MenuItem>, GatewayError>,
    ) -> Result<bool, SessionError> {
        if ticket.generation != self.menu_generation {
            debug!(restaurant_id = %ticket.restaurant_id, "discarding superseded menu response");
            return Ok(false);
        }

        self.state.loading = false;
        match menu {
            Ok(menu) => {
                debug!(restaurant_id = %ticket.restaurant_id, items = menu.len(), "menu loaded");
                self.state.menu = menu;
                Ok(true)
            }
            Err(err) => {
                warn!(restaurant_id = %ticket.restaurant_id, error = %err, "menu fetch failed");
                self.state.menu.clear();
                Err(self.fail(SessionError::Failed(LOAD_MENU_FAILED.into())))
            }
        }
    }

    /// Refetches the selected restaurant's menu without touching the cart.
    pub async fn reload_menu(&mut self) -> Result<(), SessionError> {
        let Some(restaurant_id) = self.selected_id() else {
            return Ok(());
        };
        let ticket = self.next_menu_ticket(restaurant_id);
        self.state.loading = true;
        let menu = self.gateway.list_menu(ticket.restaurant_id()).await;
        self.apply_menu(ticket, menu).map(|_| ())
    }

    pub fn add_to_cart(&mut self, item: &MenuItem) -> u32 {
        let quantity = self.state.cart.add(item);
        debug!(item_id = %item.id, quantity, "added to cart");
        quantity
    }

    pub fn change_quantity(&mut self, item_id: &MenuItemId, delta: i64) -> Option<u32> {
        self.state.cart.change_quantity(item_id, delta)
    }

    pub fn clear_cart(&mut self) {
        self.state.cart.clear();
    }

    pub fn cart_total(&self) -> f64 {
        self.state.cart.total()
    }

    /// Builds the request checkout would send, or the validation error that blocks it.
    pub fn order_request(&self) -> Result<OrderRequest, SessionError> {
        let restaurant = self
            .state
            .selected
            .as_ref()
            .ok_or_else(|| SessionError::validation(NO_RESTAURANT_SELECTED))?;
        let customer = &self.state.customer;
        if !customer.is_complete() {
            return Err(SessionError::validation(MISSING_CUSTOMER));
        }
        if self.state.cart.is_empty() {
            return Err(SessionError::validation(EMPTY_CART));
        }

        Ok(OrderRequest {
            customer_name: customer.name.trim().to_string(),
            address: customer.address.trim().to_string(),
            restaurant_id: restaurant.id.clone(),
            items: self.state.cart.order_lines(),
        })
    }

    /// Validates and submits the cart. The cart is kept when submission fails.
    pub async fn place_order(&mut self) -> Result<OrderResult, SessionError> {
        self.state.phase = SubmitPhase::Validating;
        self.state.order_result = None;
        let request = match self.order_request() {
            Ok(request) => request,
            Err(err) => {
                self.state.phase = SubmitPhase::Idle;
                return Err(self.fail(err));
            }
        };

        self.state.phase = SubmitPhase::Submitting;
        self.state.loading = true;
        self.state.error = None;
        match self.gateway.create_order(&request).await {
            Ok(result) => {
                info!(
                    order_id = %result.id,
                    total = ?result.total,
                    status = %result.status,
                    "order placed"
                );
                self.state.phase = SubmitPhase::Succeeded;
                self.state.order_result = Some(result.clone());
                self.state.cart.clear();
                self.state.loading = false;
                self.fetch_orders().await;
                Ok(result)
            }
            Err(err) => {
                warn!(error = %err, "order submission failed");
                self.state.phase = SubmitPhase::Failed;
                Err(self.fail(SessionError::from_gateway(&err, PLACE_ORDER_FAILED)))
            }
        }
    }

    pub async fn create_restaurant(&mut self) -> Result<RestaurantId, SessionError> {
        let request = self
            .state
            .restaurant_form
            .to_request()
            .map_err(|err| self.fail(err))?;

        self.state.loading = true;
        self.state.error = None;
        match self.gateway.create_restaurant(&request).await {
            Ok(restaurant_id) => {
                info!(restaurant_id = %restaurant_id, name = %request.name, "restaurant created");
                self.state.restaurant_form = RestaurantForm::default();
                self.state.loading = false;
                // A failed reload is already recorded as the session error.
                let _ = self.fetch_restaurants().await;
                Ok(restaurant_id)
            }
            Err(err) => {
                warn!(error = %err, "restaurant creation failed");
                Err(self.fail(SessionError::from_gateway(&err, CREATE_RESTAURANT_FAILED)))
            }
        }
    }

    pub async fn create_menu_item(&mut self) -> Result<(), SessionError> {
        let Some(restaurant_id) = self.selected_id() else {
            return Err(self.fail(SessionError::validation(NO_RESTAURANT_SELECTED)));
        };
        let request = self
            .state
            .menu_item_form
            .to_request(&restaurant_id)
            .map_err(|err| self.fail(err))?;

        self.state.loading = true;
        self.state.error = None;
        match self.gateway.create_menu_item(&request).await {
            Ok(()) => {
                info!(restaurant_id = %restaurant_id, title = %request.title, "menu item created");
                self.state.menu_item_form = MenuItemForm::default();
                self.state.loading = false;
                let _ = self.reload_menu().await;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "menu item creation failed");
                Err(self.fail(SessionError::from_gateway(&err, CREATE_MENU_ITEM_FAILED)))
            }
        }
    }

    /// Creates a demo restaurant with three menu items, then reloads the restaurant list.
    /// Individual items the backend refuses are skipped.
    pub async fn seed_sample_data(&mut self) -> Result<RestaurantId, SessionError> {
        self.state.loading = true;
        self.state.error = None;
        let restaurant_id = match self
            .gateway
            .create_restaurant(&seed::sample_restaurant())
            .await
        {
            Ok(restaurant_id) => restaurant_id,
            Err(err) => {
                warn!(error = %err, "seeding sample restaurant failed");
                return Err(self.fail(SessionError::Failed(SEED_FAILED.into())));
            }
        };

        for item in seed::sample_menu(&restaurant_id) {
            match self.gateway.create_menu_item(&item).await {
                Ok(()) => {}
                Err(err @ GatewayError::Rejected { .. }) => {
                    warn!(title = %item.title, error = %err, "sample menu item rejected; skipping");
                }
                Err(err) => {
                    warn!(title = %item.title, error = %err, "seeding sample menu failed");
                    return Err(self.fail(SessionError::Failed(SEED_FAILED.into())));
                }
            }
        }

        info!(restaurant_id = %restaurant_id, "sample data seeded");
        self.state.loading = false;
        let _ = self.fetch_restaurants().await;
        Ok(restaurant_id)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            restaurants: self.state.restaurants.len(),
            menu_items: self.state.menu.len(),
            orders: self.state.orders.len(),
        }
    }

    /// Order history, newest first.
    pub fn recent_orders(&self) -> impl Iterator<Item = &Order> {
        self.state.orders.iter().rev()
    }

    fn selected_id(&self) -> Option<RestaurantId> {
        self.state
            .selected
            .as_ref()
            .map(|restaurant| restaurant.id.clone())
    }

    fn next_menu_ticket(&mut self, restaurant_id: RestaurantId) -> MenuTicket {
        self.menu_generation += 1;
        MenuTicket {
            restaurant_id,
            generation: self.menu_generation,
        }
    }

    fn clear_selection(&mut self) {
        self.menu_generation += 1;
        self.state.selected = None;
        self.state.menu.clear();
        self.state.cart.clear();
        self.state.order_result = None;
    }

    fn fail(&mut self, err: SessionError) -> SessionError {
        self.state.loading = false;
        self.state.error = Some(err.to_string());
        err
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
