use clap::{Parser, Subcommand};
use storefront::{catalog::Catalog, store::CartStore};
use storefront_app::{
    config::{AppConfig, ConfigArgs},
    storage::FileStorage,
};

mod cart;
mod checkout;
mod order;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the cart
    Show,
    /// Add a catalog product to the cart
    Add(cart::AddArgs),
    /// Change the quantity of a cart line
    Update(cart::UpdateArgs),
    /// Remove a product from the cart
    Remove(cart::ProductArgs),
    /// Empty the cart
    Clear,
    /// Check whether a product is in the cart
    Contains(cart::ProductArgs),
    /// Place an order for the cart contents
    Checkout(checkout::CheckoutArgs),
    /// Show a placed order
    Order(order::OrderArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let config = AppConfig::try_from(self.config).map_err(|error| error.to_string())?;

        match self.command {
            Commands::Show => cart::show(&config),
            Commands::Add(args) => cart::add(&config, args),
            Commands::Update(args) => cart::update(&config, args),
            Commands::Remove(args) => cart::remove(&config, args),
            Commands::Clear => cart::clear(&config),
            Commands::Contains(args) => cart::contains(&config, args),
            Commands::Checkout(args) => checkout::run(&config, args).await,
            Commands::Order(args) => order::run(&config, args).await,
        }
    }
}

fn open_store(config: &AppConfig) -> Result<CartStore<FileStorage>, String> {
    let storage = FileStorage::open(&config.data_dir).map_err(|error| {
        format!(
            "failed to open data directory {}: {error}",
            config.data_dir.display()
        )
    })?;

    CartStore::load(storage, config.currency).map_err(|error| format!("failed to load cart: {error}"))
}

fn open_catalog(config: &AppConfig) -> Result<Catalog, String> {
    Catalog::from_path(&config.catalog).map_err(|error| {
        format!(
            "failed to load catalog {}: {error}",
            config.catalog.display()
        )
    })
}
