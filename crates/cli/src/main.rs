//! Babyshoe CLI - drive the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Who am I?
//! babyshoe status
//!
//! # Log in (the session cookie is kept in BABYSHOE_CART_PATH)
//! babyshoe login -e ada@example.com -p 'hunter22'
//!
//! # Finish a password reset from the emailed link
//! babyshoe reset-password --link 'https://shop.example.com/reset-password.html?token=...' \
//!     -p 'Abc12345' -c 'Abc12345'
//!
//! # Local cart
//! babyshoe cart add --id 42 --quantity 2 --price 25.00
//! babyshoe cart show
//! ```
//!
//! # Commands
//!
//! - `status` - Show session state and cart badge
//! - `login` / `register` / `forgot-password` - The shared authentication form
//! - `reset-password` - The reset-password page
//! - `logout` - End the session
//! - `cart show|add|clear` - The cart kept in local storage

#![cfg_attr(not(test), forbid(unsafe_code))]

use babyshoe_storefront::config::StorefrontConfig;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod terminal;

use commands::{CommandError, Context};

#[derive(Parser)]
#[command(name = "babyshoe")]
#[command(author, version, about = "Babyshoe storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether a session exists and the cart badge
    Status,
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Ask for a password reset link
    ForgotPassword {
        #[arg(short, long)]
        email: String,
    },
    /// Set a new password from a reset link
    ResetPassword {
        /// The full link from the reset email
        #[arg(short, long)]
        link: String,

        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short, long)]
        confirm: String,
    },
    /// End the session
    Logout,
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and totals
    Show,
    /// Add a product, merging with an existing line
    Add {
        /// Product id
        #[arg(short, long)]
        id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        #[arg(short, long)]
        name: Option<String>,

        /// Unit price
        #[arg(long)]
        price: Option<Decimal>,
    },
    /// Empty the cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Map tracing levels to Sentry: errors and warnings become events, the rest breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "babyshoe_storefront=info,babyshoe_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CommandError> {
    let ctx = Context::new(config)?;

    match cli.command {
        Commands::Status => commands::session::status(&ctx).await?,
        Commands::Login { email, password } => {
            commands::session::login(&ctx, email, password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::session::register(&ctx, name, email, password).await?,
        Commands::ForgotPassword { email } => {
            commands::session::forgot_password(&ctx, email).await?;
        }
        Commands::ResetPassword {
            link,
            password,
            confirm,
        } => commands::session::reset_password(&ctx, &link, password, confirm).await?,
        Commands::Logout => commands::session::logout(&ctx).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add {
                id,
                quantity,
                name,
                price,
            } => commands::cart::add(&ctx, id, quantity, name, price),
            CartAction::Clear => commands::cart::clear(&ctx),
        },
    }

    ctx.save_session()
}
