//! Line-oriented front end over an [`OrderingSession`], plus the one-shot order flow used by
//! the command-line binaries.

use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use shared::{
    domain::{Customer, MenuItem, Restaurant},
    protocol::OrderResult,
};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    session::{OrderingSession, SessionVariant},
    view, BackendGateway,
};

const HELP: &str = "\
commands:
  refresh                 reload restaurants and orders
  restaurants             list restaurants
  select <n|id|name>      switch restaurant (clears the cart)
  menu                    show the selected restaurant's menu
  add <n|id|title>        add one unit to the cart
  qty <n|id|title> <+/-n> change a cart quantity
  cart                    show the cart and total
  name <text>             set the customer name
  address <text>          set the delivery address
  checkout                place the order
  orders                  reload and show recent orders
  summary                 restaurant, menu item and order counts
";

const DASHBOARD_HELP: &str = "\
  seed                    create sample data
";

pub fn help(variant: SessionVariant) -> String {
    match variant {
        SessionVariant::Storefront => format!("{HELP}  quit\n"),
        SessionVariant::Dashboard => format!("{HELP}{DASHBOARD_HELP}  quit\n"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Refresh,
    Restaurants,
    Select(String),
    Menu,
    Add(String),
    Quantity { item: String, delta: i64 },
    Cart,
    Name(String),
    Address(String),
    Checkout,
    Orders,
    Summary,
    Seed,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("unknown command '{0}'; type 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for ShellCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));
        let argument = |usage: &'static str| {
            if rest.is_empty() {
                Err(CommandParseError::Usage(usage))
            } else {
                Ok(rest.to_string())
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Ok(Self::Help),
            "refresh" => Ok(Self::Refresh),
            "restaurants" | "ls" => Ok(Self::Restaurants),
            "select" => argument("select <n|id|name>").map(Self::Select),
            "menu" => Ok(Self::Menu),
            "add" => argument("add <n|id|title>").map(Self::Add),
            "qty" => {
                const USAGE: &str = "qty <n|id|title> <+/-n>";
                let (item, delta) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or(CommandParseError::Usage(USAGE))?;
                let delta = delta
                    .trim_start_matches('+')
                    .parse::<i64>()
                    .map_err(|_| CommandParseError::Usage(USAGE))?;
                Ok(Self::Quantity {
                    item: item.trim().to_string(),
                    delta,
                })
            }
            "cart" => Ok(Self::Cart),
            "name" => argument("name <text>").map(Self::Name),
            "address" => argument("address <text>").map(Self::Address),
            "checkout" => Ok(Self::Checkout),
            "orders" => Ok(Self::Orders),
            "summary" => Ok(Self::Summary),
            "seed" => Ok(Self::Seed),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

/// `KEY[:QTY]` where KEY is a menu item id or title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub key: String,
    pub quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let (key, quantity) = match raw.rsplit_once(':') {
            Some((key, quantity)) => (
                key,
                quantity
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("invalid quantity in '{raw}'"))?,
            ),
            None => (raw, 1),
        };
        let key = key.trim();
        if key.is_empty() || quantity == 0 {
            return Err(anyhow!("item spec '{raw}' must be KEY[:QTY] with QTY >= 1"));
        }
        Ok(Self {
            key: key.to_string(),
            quantity,
        })
    }
}

/// Reads commands until end of input or `quit`, writing each reply to `output`.
pub async fn run_shell<G, R, W>(
    session: &mut OrderingSession<G>,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    G: BackendGateway,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = match line.parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(session, command).await,
            Err(err) => format!("{err}\n"),
        };
        output.write_all(reply.as_bytes()).await?;
    }
    output.flush().await
}

pub async fn execute<G: BackendGateway>(
    session: &mut OrderingSession<G>,
    command: ShellCommand,
) -> String {
    match command {
        ShellCommand::Help => help(session.variant()),
        ShellCommand::Refresh => match session.refresh_all().await {
            Ok(()) => view::restaurants(session.state()),
            Err(err) => failure(err),
        },
        ShellCommand::Restaurants => view::restaurants(session.state()),
        ShellCommand::Select(key) => {
            let Some(restaurant) = resolve_restaurant(session, &key).cloned() else {
                return format!("error: no restaurant matches '{key}'\n");
            };
            match session.select_restaurant(restaurant).await {
                Ok(()) => view::menu(session.state()),
                Err(err) => failure(err),
            }
        }
        ShellCommand::Menu => view::menu(session.state()),
        ShellCommand::Add(key) => {
            let Some(item) = resolve_menu_item(session, &key).cloned() else {
                return format!("error: no menu item matches '{key}'\n");
            };
            let quantity = session.add_to_cart(&item);
            format!("{} x{quantity}\n", item.title)
        }
        ShellCommand::Quantity { item: key, delta } => {
            let Some(item) = resolve_cart_item(session, &key) else {
                return format!("error: no menu item matches '{key}'\n");
            };
            match session.change_quantity(&item.id, delta) {
                None => format!("{} is not in the cart\n", item.title),
                Some(0) => format!("removed {}\n{}", item.title, view::cart(session.state())),
                Some(_) => view::cart(session.state()),
            }
        }
        ShellCommand::Cart => view::cart(session.state()),
        ShellCommand::Name(name) => {
            session.customer_mut().name = name;
            "ok\n".to_string()
        }
        ShellCommand::Address(address) => {
            session.customer_mut().address = address;
            "ok\n".to_string()
        }
        ShellCommand::Checkout => match session.place_order().await {
            Ok(result) => view::order_result(&result),
            Err(err) => failure(err),
        },
        ShellCommand::Orders => {
            session.fetch_orders().await;
            view::orders(session.recent_orders())
        }
        ShellCommand::Summary => view::summary(&session.summary()),
        ShellCommand::Seed => {
            if session.variant() != SessionVariant::Dashboard {
                return "error: seed is only available on the dashboard\n".to_string();
            }
            match session.seed_sample_data().await {
                Ok(_) => view::restaurants(session.state()),
                Err(err) => failure(err),
            }
        }
        ShellCommand::Quit => String::new(),
    }
}

/// Loads restaurants, selects one, fills the cart and submits in a single pass.
pub async fn order_once<G: BackendGateway>(
    session: &mut OrderingSession<G>,
    restaurant_key: &str,
    items: &[ItemSpec],
    customer: Customer,
) -> Result<OrderResult> {
    session.fetch_restaurants().await?;
    let restaurant = resolve_restaurant(session, restaurant_key)
        .cloned()
        .ok_or_else(|| anyhow!("no restaurant matches '{restaurant_key}'"))?;
    session.select_restaurant(restaurant).await?;

    for spec in items {
        let item = resolve_menu_item(session, &spec.key)
            .cloned()
            .ok_or_else(|| anyhow!("no menu item matches '{}'", spec.key))?;
        session.add_to_cart(&item);
        session.change_quantity(&item.id, i64::from(spec.quantity) - 1);
    }

    *session.customer_mut() = customer;
    Ok(session.place_order().await?)
}

/// 1-based list position, then id or name.
pub fn resolve_restaurant<'a, G: BackendGateway>(
    session: &'a OrderingSession<G>,
    key: &str,
) -> Option<&'a Restaurant> {
    by_position(&session.state().restaurants, key).or_else(|| session.find_restaurant(key))
}

/// 1-based menu position, then id or title.
pub fn resolve_menu_item<'a, G: BackendGateway>(
    session: &'a OrderingSession<G>,
    key: &str,
) -> Option<&'a MenuItem> {
    by_position(&session.state().menu, key).or_else(|| session.find_menu_item(key))
}

/// Cart entry by id or title, then the menu lookup. The cart outlives a failed menu reload.
pub fn resolve_cart_item<G: BackendGateway>(
    session: &OrderingSession<G>,
    key: &str,
) -> Option<MenuItem> {
    let key = key.trim();
    session
        .state()
        .cart
        .entries()
        .map(|entry| &entry.item)
        .find(|item| item.id.as_str() == key || item.title.eq_ignore_ascii_case(key))
        .or_else(|| resolve_menu_item(session, key))
        .cloned()
}

fn by_position<'a, T>(list: &'a [T], key: &str) -> Option<&'a T> {
    let position = key.trim().parse::<usize>().ok()?;
    list.get(position.checked_sub(1)?)
}

fn failure(err: crate::SessionError) -> String {
    format!("error: {err}\n")
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
