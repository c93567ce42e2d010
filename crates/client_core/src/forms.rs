//! Raw text input for the dashboard's create forms and the checks applied before submitting them.

use shared::{
    domain::RestaurantId,
    protocol::{NewMenuItem, NewRestaurant},
};

use crate::error::SessionError;

pub const DEFAULT_RATING: f64 = 4.5;
pub const DEFAULT_DELIVERY_TIME_MIN: u32 = 30;

pub(crate) const MISSING_RESTAURANT_FIELDS: &str = "Please provide restaurant name and cuisine";
pub(crate) const MISSING_MENU_ITEM_FIELDS: &str = "Provide menu item title and price";

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantForm {
    pub name: String,
    pub cuisine: String,
    pub rating: String,
    pub delivery_time_min: String,
    pub image_url: String,
}

impl Default for RestaurantForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            cuisine: String::new(),
            rating: DEFAULT_RATING.to_string(),
            delivery_time_min: DEFAULT_DELIVERY_TIME_MIN.to_string(),
            image_url: String::new(),
        }
    }
}

impl RestaurantForm {
    /// Unparseable or zero numeric fields fall back to their defaults.
    pub fn to_request(&self) -> Result<NewRestaurant, SessionError> {
        let name = self.name.trim();
        let cuisine = self.cuisine.trim();
        if name.is_empty() || cuisine.is_empty() {
            return Err(SessionError::validation(MISSING_RESTAURANT_FIELDS));
        }

        Ok(NewRestaurant {
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            rating: parse_rating(&self.rating),
            delivery_time_min: parse_delivery_time(&self.delivery_time_min),
            image_url: non_blank(&self.image_url),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub vegetarian: bool,
    pub image_url: String,
}

impl MenuItemForm {
    pub fn to_request(&self, restaurant_id: &RestaurantId) -> Result<NewMenuItem, SessionError> {
        let title = self.title.trim();
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price >= 0.0);
        let Some(price) = price.filter(|_| !title.is_empty()) else {
            return Err(SessionError::validation(MISSING_MENU_ITEM_FIELDS));
        };

        Ok(NewMenuItem {
            restaurant_id: restaurant_id.clone(),
            title: title.to_string(),
            description: non_blank(&self.description),
            price,
            vegetarian: self.vegetarian,
            image_url: non_blank(&self.image_url),
        })
    }
}

fn parse_rating(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite() && *rating != 0.0)
        .unwrap_or(DEFAULT_RATING)
}

fn parse_delivery_time(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|minutes| *minutes > 0)
        .unwrap_or(DEFAULT_DELIVERY_TIME_MIN)
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
