use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use rocketshoes_cart::{
    handlers::{
        execute, render_cart, CartCommand, CommandOutcome, Notification, Notifier,
        TracingNotifier,
    },
    init_observability,
    repositories::{FileStorage, LocalStorageCartRepository},
    services::{ApiClient, CartContext, CartStore},
    Config,
};

#[derive(Parser)]
#[command(name = "rocketshoes-cart")]
#[command(version, about = "RocketShoes shopping cart")]
struct Cli {
    #[command(subcommand)]
    command: Option<CartCommand>,
}

/// Prints notifications the way the storefront shows its error toasts
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notification: &Notification) {
        eprintln!("error: {}", notification.message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_environment().context("Failed to load configuration")?;

    init_observability(
        &config.observability.service_name,
        &config.observability.log_level,
        config.observability.enable_json_logging,
    )?;

    let storage = Arc::new(FileStorage::new(config.storage.storage_dir.clone()));
    info!(
        api = %config.api.api_base_url,
        storage = %storage.root().display(),
        "Starting rocketshoes-cart"
    );

    let api = Arc::new(
        ApiClient::new(&config.api.api_base_url, config.api.request_timeout())
            .context("Failed to build API client")?,
    );
    let repository = Arc::new(LocalStorageCartRepository::new(storage));

    let context = CartContext::new(CartStore::new(api.clone(), api, repository));

    let command = cli.command.unwrap_or(CartCommand::Show);
    // With JSON logging on, notifications go to the log stream
    let notifier: &dyn Notifier = if config.observability.enable_json_logging {
        &TracingNotifier
    } else {
        &StderrNotifier
    };
    let outcome = execute(&context, command, notifier)
        .await
        .context("Failed to update cart storage")?;

    match outcome {
        CommandOutcome::Completed(cart) => {
            print!("{}", render_cart(&cart));
            Ok(())
        }
        CommandOutcome::Rejected(_) => std::process::exit(1),
    }
}
