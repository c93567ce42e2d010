use super::*;
use shared::domain::RestaurantId;

fn item(id: &str, price: f64) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        restaurant_id: RestaurantId::new("r-1"),
        title: format!("item {id}"),
        description: None,
        price,
        vegetarian: false,
        image_url: None,
    }
}

#[test]
fn add_inserts_then_increments() {
    let mut cart = Cart::new();
    let burger = item("a", 9.99);

    assert_eq!(cart.add(&burger), 1);
    assert_eq!(cart.add(&burger), 2);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.quantity_of(&burger.id), Some(2));
}

#[test]
fn walkthrough_from_empty_back_to_empty() {
    let mut cart = Cart::new();
    let a = item("a", 9.99);

    cart.add(&a);
    assert_eq!(cart.total(), 9.99);

    assert_eq!(cart.change_quantity(&a.id, 1), Some(2));
    assert_eq!(cart.total(), 19.98);

    assert_eq!(cart.change_quantity(&a.id, -2), Some(0));
    assert!(cart.is_empty());
    assert_eq!(cart.total(), 0.0);
}

#[test]
fn change_quantity_on_missing_item_is_noop() {
    let mut cart = Cart::new();
    cart.add(&item("a", 1.0));

    assert_eq!(cart.change_quantity(&MenuItemId::new("missing"), 5), None);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total(), 1.0);
}

#[test]
fn large_negative_delta_removes_entry() {
    let mut cart = Cart::new();
    let a = item("a", 2.5);
    cart.add(&a);
    cart.add(&a);

    assert_eq!(cart.change_quantity(&a.id, -100), Some(0));
    assert_eq!(cart.quantity_of(&a.id), None);
}

#[test]
fn quantity_is_never_zero_across_mixed_operations() {
    let mut cart = Cart::new();
    let items = [item("a", 1.25), item("b", 3.0), item("c", 0.0)];
    let deltas = [1, -1, 3, -2, -5, 2, 0, -1, 4, -4];

    for (step, delta) in deltas.iter().enumerate() {
        let target = &items[step % items.len()];
        if step % 2 == 0 {
            cart.add(target);
        }
        cart.change_quantity(&target.id, *delta);
        assert!(cart.entries().all(|entry| entry.quantity >= 1));
    }
}

#[test]
fn add_then_remove_restores_previous_total() {
    let mut cart = Cart::new();
    cart.add(&item("a", 4.1));
    cart.add(&item("b", 0.7));
    cart.add(&item("b", 0.7));
    let before = cart.total();

    let extra = item("c", 12.33);
    cart.add(&extra);
    assert_ne!(cart.total(), before);
    cart.change_quantity(&extra.id, -1);

    assert_eq!(cart.total(), before);
}

#[test]
fn total_sums_price_times_quantity() {
    let mut cart = Cart::new();
    let b = item("b", 5.0);
    let c = item("c", 1.5);
    cart.add(&b);
    cart.change_quantity(&b.id, 1);
    cart.add(&c);

    assert_eq!(cart.total(), 11.5);
    assert_eq!(
        cart.entries().map(CartEntry::subtotal).collect::<Vec<_>>(),
        vec![10.0, 1.5]
    );
}

#[test]
fn snapshot_survives_later_item_changes() {
    let mut cart = Cart::new();
    let mut a = item("a", 3.0);
    cart.add(&a);

    a.price = 100.0;
    cart.add(&a);

    assert_eq!(cart.total(), 6.0);
}

#[test]
fn order_lines_carry_only_ids_and_quantities() {
    let mut cart = Cart::new();
    let b = item("b", 5.0);
    cart.add(&b);
    cart.add(&b);

    assert_eq!(
        cart.order_lines(),
        vec![OrderLine {
            menu_item_id: MenuItemId::new("b"),
            quantity: 2,
        }]
    );
}

#[test]
fn clear_empties_cart() {
    let mut cart = Cart::new();
    cart.add(&item("a", 1.0));
    cart.add(&item("b", 2.0));

    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.total(), 0.0);
}
