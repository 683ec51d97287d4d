pub mod commands;
pub mod context;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gearcart_core::config::{AppConfig, LoadOptions};

use crate::context::AppContext;

#[derive(Debug, Parser)]
#[command(
    name = "gearcart",
    about = "GearCart storefront CLI",
    long_about = "Find vehicle-accessory recommendations and manage the cart and wishlist, \
                  online against an account or offline against the local store.",
    after_help = "Examples:\n  gearcart find --brand Toyota --model Camry\n  gearcart cart add ACC-1042 --name \"Dash Cam\" --price 2499\n  gearcart cart checkout\n  gearcart doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Search for accessory recommendations for a vehicle")]
    Find(commands::find::FindArgs),
    #[command(subcommand, about = "Inspect and mutate the shopping cart")]
    Cart(commands::cart::CartCommand),
    #[command(subcommand, about = "Inspect and mutate the wishlist")]
    Wishlist(commands::wishlist::WishlistCommand),
    #[command(about = "Sign in and sync account cart/wishlist state")]
    Login(commands::auth::LoginArgs),
    #[command(about = "Drop the credential and every account-scoped local key")]
    Logout,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, local storage, and API reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

fn init_logging(config: &AppConfig) {
    use gearcart_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration error: {error}");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    // Config rendering only needs the loaded config, not a context.
    if matches!(cli.command, Command::Config) {
        println!("{}", commands::config::run(&config));
        return ExitCode::SUCCESS;
    }

    let ctx = match AppContext::build(config) {
        Ok(ctx) => ctx,
        Err(error) => {
            eprintln!("startup error: {error}");
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Command::Find(args) => commands::find::run(&ctx, args).await,
        Command::Cart(command) => commands::cart::run(&ctx, command).await,
        Command::Wishlist(command) => commands::wishlist::run(&ctx, command).await,
        Command::Login(args) => commands::auth::login(&ctx, args).await,
        Command::Logout => commands::auth::logout(&ctx),
        Command::Config => unreachable!("handled above"),
        Command::Doctor { json } => commands::doctor::run(&ctx, json).await,
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::Cli;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
