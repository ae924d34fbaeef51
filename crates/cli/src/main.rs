//! Pink Plate CLI - drive the cart, favorites and offers from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two cheeseburgers and show the cart
//! pp-cli cart add --id 1 --name "Classic Cheeseburger" --price 299 --quantity 2
//! pp-cli cart show
//!
//! # Adjust and annotate
//! pp-cli cart decrease 1
//! pp-cli cart note 1 "no onions"
//!
//! # Place the order
//! pp-cli cart confirm --address "12 Mall Road" --city Lahore --payment cod
//!
//! # Heart a dish
//! pp-cli favorites toggle 8
//!
//! # Add a pizza with extra cheese
//! pp-cli cart add --id 3 --name "Pepperoni Pizza" --price 499 --extra-cheese
//!
//! # Browse offers from a JSON file, then take one
//! pp-cli offers list --file offers.json --category Combo --sort price-asc
//! pp-cli offers add 3 --file offers.json --quantity 2
//!
//! # Book a table
//! pp-cli reserve --name "Ayesha Khan" --email ayesha@example.com --date 2024-06-10 --slot 06:00 --guests 4
//! ```
//!
//! Exits with status 2 when the input was rejected and 1 on other failures.
//!
//! State lives under `PINK_PLATE_DATA_DIR` (see the storefront `config` module).

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::num::NonZeroU32;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pink_plate_core::{Customizations, DeliverySlot, PaymentMethod, ProductId, ReservationRequest};
use pink_plate_storefront::StorefrontError;
use pink_plate_storefront::cart::QuantityAction;
use pink_plate_storefront::config::StorefrontConfig;
use pink_plate_storefront::offers::OfferSort;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pp-cli")]
#[command(author, version, about = "Pink Plate ordering CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage favorite dishes
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Browse offers
    Offers {
        #[command(subcommand)]
        action: OffersAction,
    },
    /// Book a table
    Reserve {
        /// Guest name
        #[arg(long)]
        name: String,

        /// Contact email
        #[arg(long)]
        email: String,

        /// Date (YYYY-MM-DD), today or later
        #[arg(long)]
        date: NaiveDate,

        /// Time slot (`09:00` to `06:00`, on the hour)
        #[arg(long)]
        slot: String,

        /// Party size
        #[arg(long, default_value = "2")]
        guests: NonZeroU32,

        /// Phone number
        #[arg(long, default_value = "")]
        phone: String,

        /// Special requests
        #[arg(long, default_value = "")]
        requests: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show line items and totals
    Show,
    /// Add a product (merges with an existing line)
    Add {
        /// Product id
        #[arg(long)]
        id: ProductId,

        /// Product name
        #[arg(long)]
        name: String,

        /// List price
        #[arg(long)]
        price: Decimal,

        /// Discounted price, if the product is on offer
        #[arg(long)]
        offer_price: Option<Decimal>,

        /// Units to add
        #[arg(short, long, default_value = "1")]
        quantity: NonZeroU32,

        /// Menu category
        #[arg(long, default_value = "")]
        category: String,

        /// Image path
        #[arg(long, default_value = "")]
        image: String,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Extra cheese (+1.50 per unit)
        #[arg(long)]
        extra_cheese: bool,

        /// Spicy (+0.50 per unit)
        #[arg(long)]
        spicy: bool,

        /// Extra sauce (+0.75 per unit)
        #[arg(long)]
        extra_sauce: bool,
    },
    /// Add one unit
    Increase {
        /// Product id
        id: ProductId,
    },
    /// Remove one unit (never below one)
    Decrease {
        /// Product id
        id: ProductId,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Set special instructions for a line
    Note {
        /// Product id
        id: ProductId,

        /// Instructions (empty to clear)
        #[arg(default_value = "")]
        text: String,
    },
    /// Place the order and clear the cart
    Confirm {
        /// Street address
        #[arg(long, default_value = "")]
        address: String,

        /// City
        #[arg(long, default_value = "")]
        city: String,

        /// Zip code
        #[arg(long, default_value = "")]
        zip: String,

        /// Notes for the rider
        #[arg(long, default_value = "")]
        notes: String,

        /// Payment method (`credit-card`, `paypal`, `cod`)
        #[arg(long, default_value = "credit-card")]
        payment: PaymentMethod,

        /// Delivery slot (`asap`, `12:00`, `12:30`, `13:00`)
        #[arg(long, default_value = "asap")]
        slot: DeliverySlot,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// Add or remove a favorite
    Toggle {
        /// Product id
        id: ProductId,
    },
    /// List favorite ids
    List,
}

#[derive(Subcommand)]
enum OffersAction {
    /// Filter, sort and page through offers
    List {
        /// JSON file with an array of offers
        #[arg(long)]
        file: PathBuf,

        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        search: String,

        /// Category (`All` for every category)
        #[arg(long, default_value = "All")]
        category: String,

        /// Sort order (`default`, `price-asc`, `price-desc`, `rating`)
        #[arg(long, default_value = "default")]
        sort: OfferSort,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Offers per page
        #[arg(long, default_value = "6")]
        per_page: usize,
    },
    /// Put an offer in the cart at its discounted price
    Add {
        /// Offer id
        id: ProductId,

        /// JSON file with an array of offers
        #[arg(long)]
        file: PathBuf,

        /// Units to add
        #[arg(short, long, default_value = "1")]
        quantity: NonZeroU32,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pink_plate_cli=info,pink_plate_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(if e.is_user_error() { 2 } else { 1 });
    }
}

fn run(cli: Cli) -> Result<(), StorefrontError> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(data_dir = %config.data_dir.display(), "Configuration loaded");

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config)?,
            CartAction::Add {
                id,
                name,
                price,
                offer_price,
                quantity,
                category,
                image,
                description,
                extra_cheese,
                spicy,
                extra_sauce,
            } => {
                let mut product = pink_plate_core::Product::new(id, name, price)
                    .with_category(category)
                    .with_image(image)
                    .with_description(description);
                if let Some(offer_price) = offer_price {
                    product = product.with_offer_price(offer_price);
                }
                let customizations = Customizations {
                    extra_cheese,
                    spicy,
                    extra_sauce,
                };
                commands::cart::add(&config, &product, customizations, quantity)?;
            }
            CartAction::Increase { id } => {
                commands::cart::step(&config, id, QuantityAction::Increase)?;
            }
            CartAction::Decrease { id } => {
                commands::cart::step(&config, id, QuantityAction::Decrease)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&config, id)?,
            CartAction::Note { id, text } => commands::cart::note(&config, id, &text)?,
            CartAction::Confirm {
                address,
                city,
                zip,
                notes,
                payment,
                slot,
            } => {
                let details = pink_plate_core::DeliveryDetails::new(address, city)
                    .with_zip_code(zip)
                    .with_instructions(notes);
                commands::cart::confirm(&config, details, payment, slot)?;
            }
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::Toggle { id } => commands::favorites::toggle(&config, id)?,
            FavoritesAction::List => commands::favorites::list(&config),
        },
        Commands::Offers { action } => match action {
            OffersAction::List {
                file,
                search,
                category,
                sort,
                page,
                per_page,
            } => {
                let options = commands::offers::ListOptions {
                    search,
                    category,
                    sort,
                    page,
                    per_page,
                };
                commands::offers::list(&config, &file, &options)?;
            }
            OffersAction::Add { id, file, quantity } => {
                commands::offers::add(&config, &file, id, quantity)?;
            }
        },
        Commands::Reserve {
            name,
            email,
            date,
            slot,
            guests,
            phone,
            requests,
        } => {
            let request = ReservationRequest::new(name, email, date, slot)
                .with_guests(guests)
                .with_phone(phone)
                .with_special_requests(requests);
            commands::reservation::reserve(&request, chrono::Utc::now().date_naive())?;
        }
    }
    Ok(())
}
