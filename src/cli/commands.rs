use std::path::Path;

use crate::app::{AppContext, Result};
use crate::domain::Record;
use crate::scraper::{ChromeSession, DetailEnricher, EnrichSummary, PageWalker};
use crate::store::Repository;

pub async fn scrape(ctx: &AppContext, output: Option<&Path>, enrich: bool) -> Result<()> {
    let url = ctx.config.profile.list_url()?;
    let output = output.unwrap_or(ctx.config.paths.books.as_path());

    let records = scrape_profile(ctx, &url, enrich).await?;
    ctx.repository.save(&records, output)?;
    println!("Saved {} books to {}", records.len(), output.display());

    Ok(())
}

pub async fn enrich(ctx: &AppContext, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let input = input.unwrap_or(ctx.config.paths.books.as_path());
    let output = output.unwrap_or(ctx.config.paths.enriched.as_path());

    let mut records = ctx.repository.load(input)?;
    println!("Loaded {} books from {}", records.len(), input.display());

    let session = ChromeSession::launch(&ctx.config.scraper).await?;
    let summary = DetailEnricher::new(ctx.config.scraper.clone())
        .enrich(&session, &mut records)
        .await;
    session.close().await;
    print_summary(&summary);

    ctx.repository.save(&records, output)?;
    println!("Saved {} books to {}", records.len(), output.display());

    Ok(())
}

pub fn convert(ctx: &AppContext, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let input = input.unwrap_or(ctx.config.paths.enriched.as_path());
    let output = output.unwrap_or(ctx.config.paths.goodreads.as_path());

    let count = ctx.repository.convert_to_target_schema(input, output)?;
    println!("Converted {} books to Goodreads format: {}", count, output.display());

    Ok(())
}

/// Full pipeline: scrape, save, enrich, save, convert.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let paths = &ctx.config.paths;

    scrape(ctx, Some(paths.books.as_path()), false).await?;
    enrich(ctx, Some(paths.books.as_path()), Some(paths.enriched.as_path())).await?;
    convert(ctx, Some(paths.enriched.as_path()), Some(paths.goodreads.as_path()))?;

    Ok(())
}

pub fn list(ctx: &AppContext, input: Option<&Path>) -> Result<()> {
    let input = input.unwrap_or(ctx.config.paths.books.as_path());
    let records = ctx.repository.load(input)?;

    if records.is_empty() {
        println!("No books");
        return Ok(());
    }

    for record in &records {
        let rating = if record.user_rating.is_empty() {
            "-"
        } else {
            record.user_rating.as_str()
        };
        println!("{:>2} {}", rating, record);
    }
    println!("\n{} books", records.len());

    Ok(())
}

async fn scrape_profile(ctx: &AppContext, url: &str, enrich: bool) -> Result<Vec<Record>> {
    let config = &ctx.config.scraper;
    let session = ChromeSession::launch(config).await?;

    let result: Result<Vec<Record>> = async {
        let mut records = PageWalker::new(config.clone()).walk(&session, url).await?;
        println!("Scraped {} books from the profile", records.len());

        if enrich {
            let summary = DetailEnricher::new(config.clone())
                .enrich(&session, &mut records)
                .await;
            print_summary(&summary);
        }
        Ok(records)
    }
    .await;

    session.close().await;
    result
}

fn print_summary(summary: &EnrichSummary) {
    println!(
        "Enriched {} books: {} original titles, {} fell back to the Polish title",
        summary.visited(),
        summary.resolved,
        summary.fallback
    );
    if summary.skipped > 0 {
        println!("Skipped {} books without a valid link", summary.skipped);
    }
}
