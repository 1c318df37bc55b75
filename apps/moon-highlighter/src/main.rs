//! moon-highlighter binary
//!
//! Entry point for the command-line highlighter.

use clap::Parser;
use moon_highlighter::{report, Args, Mode, RunConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting moon-highlighter v{}", env!("CARGO_PKG_VERSION"));

    match args.mode() {
        Mode::ListBooks => {
            let books = moon_highlighter::list_books(&args.database).await?;
            print!("{}", report::render_books(&books));
        }
        Mode::Check => {
            let config = RunConfig::from_args(&args)?;
            let check = moon_highlighter::check(&config).await?;
            print!("{}", report::render_check(&check));
        }
        Mode::Process => {
            let config = RunConfig::from_args(&args)?;
            tracing::info!("PDF: {}", config.pdf.display());
            tracing::info!("Book: {}", config.book);

            let summary = moon_highlighter::run(&config).await?;
            print!("{}", report::render(&summary));
        }
    }

    Ok(())
}
