use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shelfport::app::AppContext;
use shelfport::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut ctx = AppContext::new(cli.config.as_deref())?;
    if cli.headed {
        ctx.config.scraper.headless = false;
    }

    match cli.command {
        Commands::Scrape { output, enrich } => {
            commands::scrape(&ctx, output.as_deref(), enrich).await?;
        }
        Commands::Enrich { input, output } => {
            commands::enrich(&ctx, input.as_deref(), output.as_deref()).await?;
        }
        Commands::Convert { input, output } => {
            commands::convert(&ctx, input.as_deref(), output.as_deref())?;
        }
        Commands::Run => {
            commands::run(&ctx).await?;
        }
        Commands::List { input } => {
            commands::list(&ctx, input.as_deref())?;
        }
    }

    Ok(())
}
