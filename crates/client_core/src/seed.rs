use shared::{
    domain::RestaurantId,
    protocol::{NewMenuItem, NewRestaurant},
};

pub(crate) fn sample_restaurant() -> NewRestaurant {
    NewRestaurant {
        name: "Blue Bites".to_string(),
        cuisine: "Burgers".to_string(),
        rating: 4.6,
        delivery_time_min: 25,
        image_url: Some(
            "https://images.unsplash.com/photo-1550317138-10000687a72b?q=80&w=1200&auto=format&fit=crop"
                .to_string(),
        ),
    }
}

pub(crate) fn sample_menu(restaurant_id: &RestaurantId) -> Vec<NewMenuItem> {
    [
        (
            "Classic Burger",
            "Juicy beef patty with cheddar and house sauce",
            9.99,
            false,
            "https://images.unsplash.com/photo-1550547660-d9450f859349?q=80&w=1200&auto=format&fit=crop",
        ),
        (
            "Veggie Delight",
            "Grilled veggie patty with avocado",
            8.49,
            true,
            "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?q=80&w=1200&auto=format&fit=crop",
        ),
        (
            "Loaded Fries",
            "Crispy fries with cheese and bacon bits",
            5.99,
            false,
            "https://images.unsplash.com/photo-1540189549336-e6e99c3679fe?q=80&w=1200&auto=format&fit=crop",
        ),
    ]
    .into_iter()
    .map(|(title, description, price, vegetarian, image_url)| NewMenuItem {
        restaurant_id: restaurant_id.clone(),
        title: title.to_string(),
        description: Some(description.to_string()),
        price,
        vegetarian,
        image_url: Some(image_url.to_string()),
    })
    .collect()
}
