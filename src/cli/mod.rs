pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shelfport")]
#[command(about = "Export a lubimyczytac.pl library to Goodreads", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/shelfport/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show the browser window while scraping
    #[arg(long, global = true)]
    pub headed: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape the configured profile's library
    Scrape {
        /// Where to save the books (default: paths.books)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also visit every book page for ISBN and original title
        #[arg(long)]
        enrich: bool,
    },
    /// Add ISBN and original titles to previously scraped books
    Enrich {
        /// Scraped books (default: paths.books)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to save the enriched books (default: paths.enriched)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert a book file to the Goodreads import format
    Convert {
        /// Book file (default: paths.enriched)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Goodreads CSV to write (default: paths.goodreads)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Scrape, enrich and convert in one go
    Run,
    /// List books in a file
    List {
        /// Book file (default: paths.books)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}
