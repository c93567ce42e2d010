use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings,
    shell::{self, ItemSpec},
    view, HttpGateway, OrderingSession, SessionVariant,
};
use shared::domain::Customer;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse restaurants and place food orders")]
struct Cli {
    /// Overrides `backend_url` from client.toml and the environment.
    #[arg(long)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List restaurants.
    Restaurants,
    /// Show one restaurant's menu.
    Menu { restaurant: String },
    /// Place an order in one step.
    Order {
        #[arg(long)]
        restaurant: String,
        /// Menu item id or title, optionally suffixed with `:QTY`.
        #[arg(long = "item", required = true)]
        items: Vec<ItemSpec>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
    },
    /// Show recent orders, newest first.
    Orders,
    /// Interactive ordering shell (default).
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
    tracing::info!(backend_url = %settings.backend_url, "storefront starting");

    let gateway = HttpGateway::new(settings.backend_url);
    let mut session = OrderingSession::new(gateway, SessionVariant::Storefront);

    match cli.command.unwrap_or(Command::Shell) {
        Command::Restaurants => {
            session.fetch_restaurants().await?;
            print!("{}", view::restaurants(session.state()));
        }
        Command::Menu { restaurant } => {
            session.fetch_restaurants().await?;
            let restaurant = shell::resolve_restaurant(&session, &restaurant)
                .cloned()
                .ok_or_else(|| anyhow!("no restaurant matches '{restaurant}'"))?;
            session.select_restaurant(restaurant).await?;
            print!("{}", view::menu(session.state()));
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
