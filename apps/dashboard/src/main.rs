use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings,
    shell::{self, ItemSpec},
    view, BackendGateway, HttpGateway, OrderingSession, SessionVariant,
};
use shared::domain::Customer;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Manage restaurants and menus, and watch incoming orders")]
struct Cli {
    #[arg(long)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Restaurants,
    Menu {
        restaurant: String,
    },
    /// Create a restaurant. Rating and delivery time fall back to 4.5 and 30.
    AddRestaurant {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cuisine: String,
        #[arg(long)]
        rating: Option<String>,
        #[arg(long)]
        delivery_time_min: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Add a menu item to a restaurant.
    AddItem {
        #[arg(long)]
        restaurant: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        vegetarian: bool,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Create the "Blue Bites" sample restaurant and menu.
    Seed,
    Order {
        #[arg(long)]
        restaurant: String,
        #[arg(long = "item", required = true)]
        items: Vec<ItemSpec>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
    },
    Orders,
    /// Restaurant, menu item and order counts.
    Summary,
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings()?.with_backend_url(cli.backend_url.as_deref())?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!(backend_url = %settings.backend_url, "dashboard starting");

    let gateway = HttpGateway::new(settings.backend_url);
    let mut session = OrderingSession::new(gateway, SessionVariant::Dashboard);

    match cli.command.unwrap_or(Command::Shell) {
        Command::Restaurants => {
            session.fetch_restaurants().await?;
            print!("{}", view::restaurants(session.state()));
        }
        Command::Menu { restaurant } => {
            select(&mut session, &restaurant).await?;
            print!("{}", view::menu(session.state()));
        }
        Command::AddRestaurant {
            name,
            cuisine,
            rating,
            delivery_time_min,
            image_url,
        } => {
            let form = session.restaurant_form_mut();
            form.name = name;
            form.cuisine = cuisine;
            if let Some(rating) = rating {
                form.rating = rating;
            }
            if let Some(delivery_time_min) = delivery_time_min {
                form.delivery_time_min = delivery_time_min;
            }
            form.image_url = image_url.unwrap_or_default();
            let restaurant_id = session.create_restaurant().await?;
            println!("created restaurant {restaurant_id}");
            print!("{}", view::restaurants(session.state()));
        }
        Command::AddItem {
            restaurant,
            title,
            price,
            description,
            vegetarian,
            image_url,
        } => {
            select(&mut session, &restaurant).await?;
            let form = session.menu_item_form_mut();
            form.title = title;
            form.price = price;
            form.description = description.unwrap_or_default();
            form.vegetarian = vegetarian;
            form.image_url = image_url.unwrap_or_default();
            session.create_menu_item().await?;
            print!("{}", view::menu(session.state()));
        }
        Command::Seed => {
            let restaurant_id = session.seed_sample_data().await?;
            println!("seeded restaurant {restaurant_id}");
            print!("{}", view::restaurants(session.state()));
        }
        Command::Order {
            restaurant,
            items,
            name,
            address,
        } => {
            let result =
                shell::order_once(&mut session, &restaurant, &items, Customer::new(name, address))
                    .await?;
            print!("{}", view::order_result(&result));
        }
        Command::Orders => {
            session.fetch_orders().await;
            print!("{}", view::orders(session.recent_orders()));
        }
        Command::Summary => {
            session.refresh_all().await?;
            print!("{}", view::summary(&session.summary()));
        }
        Command::Shell => {
            if let Err(err) = session.refresh_all().await {
                eprintln!("error: {err}");
            }
            println!("Type 'help' for commands.");
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run_shell(&mut session, stdin, tokio::io::stdout()).await?;
        }
    }

    Ok(())
}

async fn select<G: BackendGateway>(session: &mut OrderingSession<G>, key: &str) -> Result<()> {
    session.fetch_restaurants().await?;
    let restaurant = shell::resolve_restaurant(session, key)
        .cloned()
        .ok_or_else(|| anyhow!("no restaurant matches '{key}'"))?;
    let already_selected = session
        .state()
        .selected
        .as_ref()
        .is_some_and(|selected| selected.id == restaurant.id);
    if !already_selected {
        session.select_restaurant(restaurant).await?;
    }
    Ok(())
}
