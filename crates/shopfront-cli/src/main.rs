mod commands;

use clap::{Parser, Subcommand};
use shopfront_commerce::{CommerceClient, StorefrontClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopfront-cli")]
#[command(about = "Shopfront storefront command line interface")]
struct Cli {
    /// Storefront origin serving `/api/variations/{productId}`.
    #[arg(long, global = true)]
    storefront_url: Option<String>,

    /// Read variations straight from the commerce API instead of the storefront.
    #[arg(long, global = true)]
    direct: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List a product's colors and whether each can be selected.
    Colors {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        product_id: u64,
    },
    /// Select a color and print the variation it resolves to.
    Select {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        product_id: u64,
        color: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let mut config = shopfront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(url) = cli.storefront_url {
        config.storefront_url = url.trim_end_matches('/').to_owned();
    }

    let Some(command) = cli.command else {
        println!("shopfront-cli ready; see --help for commands");
        return Ok(());
    };

    if cli.direct {
        let source = CommerceClient::from_app_config(&config)?;
        commands::run(source, command).await
    } else {
        let source = StorefrontClient::from_app_config(&config)?;
        commands::run(source, command).await
    }
}
