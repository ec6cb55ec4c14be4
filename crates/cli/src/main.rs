//! Sakaya CLI - the sake shop storefront on the command line.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! sakaya home
//! sakaya products --category sake --search 山田錦
//!
//! # Cart and checkout
//! sakaya cart add 1
//! sakaya cart qty 1760000000000 3
//! sakaya cart checkout --email taro@example.com
//!
//! # お酒診断 and random suggestions
//! sakaya diagnosis answer dry medium special warm
//! sakaya random --draws 3
//!
//! # Admin
//! sakaya admin login -e admin@sake-shop.com -p admin123
//! sakaya admin dashboard
//! sakaya admin ship ORD-1760000000000
//!
//! # Maintenance
//! sakaya migrate
//! sakaya seed --file catalog.yaml --force
//! ```
//!
//! Add `--json` to any command to print the view as JSON.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sakaya_core::Category;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "sakaya")]
#[command(author, version, about = "酒屋 - sake shop storefront")]
struct Cli {
    /// Print views as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Home page
    Home,
    /// Product listing
    Products {
        /// Category filter (`sake`, `shochu`, `wine`, `beer`, `snack` or `all`)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Search name, description and tags
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },
    /// お酒診断
    Diagnosis {
        #[command(subcommand)]
        action: Option<DiagnosisAction>,
    },
    /// Random suggestion
    Random {
        /// Number of draws in a row
        #[arg(short, long, default_value_t = 1)]
        draws: u32,

        #[command(subcommand)]
        action: Option<RandomAction>,
    },
    /// Manage customer accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Admin login and dashboard
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Create the local store and its schema
    Migrate,
    /// Load the product catalog
    Seed {
        /// YAML product list (defaults to the demo catalog)
        #[arg(short, long)]
        file: Option<String>,

        /// Upsert every product even if the catalog is not empty
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        product_id: i64,
    },
    /// Set the quantity of a cart line (0 or less removes it)
    Qty {
        /// Cart line id
        id: i64,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a cart line
    Remove {
        /// Cart line id
        id: i64,
    },
    /// Place an order for the whole cart
    Checkout {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        address: Option<String>,
    },
}

#[derive(Subcommand)]
enum DiagnosisAction {
    /// Show the questions
    Questions,
    /// Answer all four questions (e.g. `dry medium special warm`)
    Answer {
        #[arg(num_args = 1..)]
        answers: Vec<String>,
    },
    /// List past results
    History,
}

#[derive(Subcommand)]
enum RandomAction {
    /// Show the current suggestion and history without drawing
    History,
    /// Show a suggestion from the history again
    Revisit {
        /// Suggestion id
        id: i64,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List customer accounts
    List,
    /// Register a customer account
    Add {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        name: String,

        /// Mark the account as an administrator
        #[arg(long)]
        admin: bool,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Log in as the shop administrator
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Stats, recent orders and low stock
    Dashboard,
    /// Mark a pending order as shipped
    Ship {
        /// Order number (`ORD-...`)
        order_id: String,
    },
    /// Cancel a pending order
    Cancel {
        /// Order number (`ORD-...`)
        order_id: String,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: Option<AdminProductAction>,
    },
}

#[derive(Subcommand)]
enum AdminProductAction {
    /// List products
    List,
    /// Add a product from a YAML file
    Add {
        #[arg(short, long)]
        file: String,
    },
    /// Create or overwrite a product from a YAML file
    Update {
        #[arg(short, long)]
        file: String,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: i64,
    },
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    // Logs go to stderr so views on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        e.log();
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    match cli.command {
        Commands::Home => commands::shop::home(json).await,
        Commands::Products { category, search } => {
            let category = parse_category(&category)?;
            commands::shop::products(json, category, search).await
        }
        Commands::Cart { action } => match action.unwrap_or(CartAction::Show) {
            CartAction::Show => commands::shop::cart(json).await,
            CartAction::Add { product_id } => commands::shop::add_to_cart(json, product_id).await,
            CartAction::Qty { id, quantity } => {
                commands::shop::update_quantity(json, id, quantity).await
            }
            CartAction::Remove { id } => commands::shop::remove(json, id).await,
            CartAction::Checkout {
                name,
                email,
                address,
            } => commands::shop::checkout(json, name, email, address).await,
        },
        Commands::Diagnosis { action } => match action.unwrap_or(DiagnosisAction::Questions) {
            DiagnosisAction::Questions => commands::diagnosis::questions(json),
            DiagnosisAction::Answer { answers } => commands::diagnosis::answer(json, answers).await,
            DiagnosisAction::History => commands::diagnosis::history(json).await,
        },
        Commands::Random { draws, action } => match action {
            None => commands::random::draw(json, draws).await,
            Some(RandomAction::History) => commands::random::history(json).await,
            Some(RandomAction::Revisit { id }) => commands::random::revisit(json, id).await,
        },
        Commands::Users { action } => match action {
            UsersAction::List => commands::users::list(json).await,
            UsersAction::Add { email, name, admin } => {
                commands::users::add(json, &email, &name, admin).await
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Login { email, password } => {
                commands::admin::login(json, &email, password).await
            }
            AdminAction::Logout => commands::admin::logout().await,
            AdminAction::Dashboard => commands::admin::dashboard(json).await,
            AdminAction::Ship { order_id } => commands::admin::ship(json, &order_id).await,
            AdminAction::Cancel { order_id } => commands::admin::cancel(json, &order_id).await,
            AdminAction::Products { action } => match action.unwrap_or(AdminProductAction::List) {
                AdminProductAction::List => commands::admin::list_products(json).await,
                AdminProductAction::Add { file } => commands::admin::add_product(&file).await,
                AdminProductAction::Update { file } => {
                    commands::admin::update_product(&file).await
                }
                AdminProductAction::Delete { id } => commands::admin::delete_product(id).await,
            },
        },
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed { file, force } => commands::seed::run(file.as_deref(), force).await,
    }
}

fn parse_category(raw: &str) -> Result<Option<Category>, CliError> {
    if raw == "all" {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|e: sakaya_core::CategoryError| CliError::Input(e.to_string()))
}
