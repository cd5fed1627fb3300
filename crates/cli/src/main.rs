//! Course Shop CLI - Operator tools against the Course Shop backend.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (password may also come from COURSE_SHOP_ADMIN_PASSWORD)
//! cs-cli login -e admin@example.com -p secret123
//!
//! # Show who is signed in
//! cs-cli whoami
//!
//! # List active sellers matching "karim"
//! cs-cli sellers list -s karim --status active
//!
//! # Flip a payment method's status
//! cs-cli payment-methods toggle 64f1c0ffee
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - Manage the stored admin session
//! - `sellers list|toggle|stats` - Inspect and manage sellers
//! - `payment-methods list|toggle` - Inspect and manage payment methods
//!
//! # Environment Variables
//!
//! - `BACKEND_API_URL` - Base URL of the REST backend
//! - `BACKEND_TIMEOUT_SECS` - Backend request timeout (default: 15)
//! - `COURSE_SHOP_SESSION_FILE` - Where the token is kept
//!   (default: `.course-shop-session.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use course_shop_core::StatusFilter;

mod commands;
mod session_file;

use commands::Context;

#[derive(Debug, Parser)]
#[command(name = "cs-cli")]
#[command(author, version, about = "Course Shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and store the admin token
    Login {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(short, long, env = "COURSE_SHOP_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored admin token
    Logout,
    /// Verify the stored token and show the signed-in admin
    Whoami,
    /// Manage sellers
    Sellers {
        #[command(subcommand)]
        action: SellerAction,
    },
    /// Manage payment methods
    PaymentMethods {
        #[command(subcommand)]
        action: PaymentMethodAction,
    },
}

#[derive(Debug, Subcommand)]
enum SellerAction {
    /// List sellers
    List {
        /// Match against name, email, phone or seller code
        #[arg(short, long, default_value = "")]
        search: String,

        /// `all`, `active` or `inactive`
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Flip a seller's active status
    Toggle {
        /// Seller ID
        id: String,
    },
    /// Show order and commission figures for a seller
    Stats {
        /// Seller ID
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum PaymentMethodAction {
    /// List payment methods
    List {
        /// Match against name or number
        #[arg(short, long, default_value = "")]
        search: String,

        /// `all`, `active` or `inactive`
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Flip a payment method's active status
    Toggle {
        /// Payment method ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::from_env()?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&ctx, &email, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Sellers { action } => match action {
            SellerAction::List { search, status } => {
                commands::sellers::list(&ctx, &search, status).await?;
            }
            SellerAction::Toggle { id } => commands::sellers::toggle(&ctx, &id).await?,
            SellerAction::Stats { id } => commands::sellers::stats(&ctx, &id).await?,
        },
        Commands::PaymentMethods { action } => match action {
            PaymentMethodAction::List { search, status } => {
                commands::payment_methods::list(&ctx, &search, status).await?;
            }
            PaymentMethodAction::Toggle { id } => {
                commands::payment_methods::toggle(&ctx, &id).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seller_list_filters() {
        let cli = Cli::try_parse_from(["cs-cli", "sellers", "list", "-s", "karim", "--status", "active"])
            .unwrap();
        match cli.command {
            Commands::Sellers {
                action: SellerAction::List { search, status },
            } => {
                assert_eq!(search, "karim");
                assert_eq!(status, StatusFilter::Active);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        let err = Cli::try_parse_from(["cs-cli", "payment-methods", "list", "--status", "paused"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_login_requires_email() {
        assert!(Cli::try_parse_from(["cs-cli", "login", "-p", "secret123"]).is_err());
    }
}
