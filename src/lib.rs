//! # Shelfport
//!
//! Exports a lubimyczytac.pl reading list to a CSV file Goodreads can import.
//!
//! ## Architecture
//!
//! ```text
//! Walker → Extractor → Store → Enricher → Store → Converter
//! ```
//!
//! - [`scraper`]: headless Chrome session, listing walker, detail enricher
//! - [`store`]: CSV persistence and the Goodreads conversion
//! - [`domain`]: the book record and shelf classification
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape, enrich and convert the configured profile
//! shelfport run
//!
//! # Or step by step
//! shelfport scrape -o dane/books.csv
//! shelfport enrich -i dane/books.csv -o dane/books_enriched.csv
//! shelfport convert -i dane/books_enriched.csv -o dane/goodreads.csv
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the loaded
/// configuration and the repository.
pub mod app;

/// Command-line interface using clap.
///
/// - `scrape [--enrich]` - Walk the profile's library list
/// - `enrich` - Visit each book's page for ISBN and original title
/// - `convert` - Write the Goodreads import file
/// - `run` - All of the above
/// - `list` - Print a book file
pub mod cli;

/// Configuration loaded from `~/.config/shelfport/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Record`](domain::Record): one book, fifteen text fields
/// - [`GoodreadsRow`](domain::GoodreadsRow): a row of the import file
pub mod domain;

/// Browser automation for the library listing and book pages.
///
/// - [`Session`](scraper::Session) / [`Node`](scraper::Node): browser capability traits
/// - [`ChromeSession`](scraper::ChromeSession): chromiumoxide implementation
/// - [`PageWalker`](scraper::PageWalker): paginated listing traversal
/// - [`DetailEnricher`](scraper::DetailEnricher): detail page lookups
pub mod scraper;

/// CSV persistence.
///
/// - [`Repository`](store::Repository): trait defining storage operations
/// - [`CsvRepository`](store::CsvRepository): csv crate implementation
pub mod store;
