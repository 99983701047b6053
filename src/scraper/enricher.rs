use html_escape::decode_html_entities;
use tracing::{debug, info, warn};

use crate::app::{Result, ShelfportError};
use crate::domain::Record;
use crate::scraper::config::ScraperConfig;
use crate::scraper::selectors::{DETAILS_BLOCK, ISBN_META, ORIGINAL_TITLE_LABEL, PAGE_READY};
use crate::scraper::{Node, Session};

/// What happened to one record during enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// The detail page named an original title.
    Resolved,
    /// No original title was found; the local title was used instead.
    Fallback,
    /// The record has no usable link and was left untouched.
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub resolved: usize,
    pub fallback: usize,
    pub skipped: usize,
}

impl EnrichSummary {
    fn record(&mut self, outcome: EnrichOutcome) {
        match outcome {
            EnrichOutcome::Resolved => self.resolved += 1,
            EnrichOutcome::Fallback => self.fallback += 1,
            EnrichOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn visited(&self) -> usize {
        self.resolved + self.fallback
    }
}

/// Fields read from a book's detail page.
#[derive(Debug, Default)]
struct DetailPage {
    isbn: String,
    original_title: Option<String>,
}

/// Fills in ISBN and original title from each record's detail page.
pub struct DetailEnricher {
    config: ScraperConfig,
}

impl DetailEnricher {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// Enrich every record in place, one detail page at a time.
    pub async fn enrich<S: Session>(&self, session: &S, records: &mut [Record]) -> EnrichSummary {
        let mut summary = EnrichSummary::default();
        let total = records.len();

        for (i, record) in records.iter_mut().enumerate() {
            let outcome = self.enrich_record(session, record).await;
            debug!("[{}/{}] {}: {:?}", i + 1, total, record, outcome);
            summary.record(outcome);
        }

        if summary.skipped > 0 {
            warn!("Skipped {} records without a valid link", summary.skipped);
        }
        info!(
            "Enriched {} records ({} original titles, {} fallbacks)",
            summary.visited(),
            summary.resolved,
            summary.fallback
        );
        summary
    }

    /// Enrich a single record. Only `isbn` and `original_title` are touched.
    pub async fn enrich_record<S: Session>(&self, session: &S, record: &mut Record) -> EnrichOutcome {
        if !record.has_valid_link() {
            debug!("Invalid link {:?} for {}", record.link, record);
            return EnrichOutcome::Skipped;
        }

        let original_title = match self.visit(session, &record.link).await {
            Ok(page) => {
                record.isbn = page.isbn;
                page.original_title
            }
            Err(e) => {
                warn!("Failed to read details from {}: {}", record.link, e);
                None
            }
        };

        match original_title {
            Some(title) => {
                record.original_title = title;
                EnrichOutcome::Resolved
            }
            None => {
                record.original_title = record.title.clone();
                EnrichOutcome::Fallback
            }
        }
    }

    async fn visit<S: Session>(&self, session: &S, url: &str) -> Result<DetailPage> {
        session.navigate(url).await?;

        if session
            .wait_for(PAGE_READY, self.config.detail_timeout())
            .await?
            .is_none()
        {
            return Err(ShelfportError::Browser(format!("{} did not finish loading", url)));
        }

        let isbn = match session.find(ISBN_META).await {
            Ok(Some(meta)) => meta
                .attribute("content")
                .await
                .ok()
                .flatten()
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };

        let original_title = match session
            .wait_for(DETAILS_BLOCK, self.config.detail_timeout())
            .await
        {
            Ok(Some(block)) => match block.inner_html().await {
                Ok(html) => parse_original_title(&html),
                Err(_) => None,
            },
            _ => {
                debug!("No details section on {}", url);
                None
            }
        };

        Ok(DetailPage {
            isbn,
            original_title,
        })
    }
}

/// Find the value of the "Tytuł oryginału:" entry in a details block.
///
/// The value is the first `<dd>` after the label. Returns `None` when the label
/// or the element is missing or the value is blank.
pub fn parse_original_title(html: &str) -> Option<String> {
    let label = html.find(ORIGINAL_TITLE_LABEL)?;
    let after_label = &html[label + ORIGINAL_TITLE_LABEL.len()..];

    let open = after_label.find("<dd")?;
    let after_open = &after_label[open..];
    let start = after_open.find('>')? + 1;
    let end = after_open[start..].find("</dd>")? + start;

    let value = decode_html_entities(after_open[start..end].trim()).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::testing::{FakeElement, FakeSession};

    fn quick_config() -> ScraperConfig {
        ScraperConfig {
            detail_timeout_ms: 20,
            ..Default::default()
        }
    }

    fn detail_page(isbn: Option<&str>, details_html: Option<&str>) -> FakeElement {
        let mut head = FakeElement::new("head");
        if let Some(isbn) = isbn {
            head = head.child(
                FakeElement::new("meta")
                    .attr("property", "books:isbn")
                    .attr("content", isbn),
            );
        }
        let mut html = FakeElement::new("html").child(head);
        if let Some(details) = details_html {
            html = html.child(FakeElement::new("div").id("book-details").html(details));
        }
        html
    }

    fn record_with_link(title: &str, link: &str) -> Record {
        Record {
            title: title.to_string(),
            link: link.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_original_title() {
        let html = r#"
            <dt>Tytuł oryginału:</dt>
            <dd>Original Book Title</dd>
        "#;
        assert_eq!(parse_original_title(html), Some("Original Book Title".into()));
    }

    #[test]
    fn test_parse_original_title_with_attributes_and_entities() {
        let html = r#"<dt>Wydawnictwo:</dt><dd>SuperNOWA</dd>
            <dt>Tytuł oryginału:</dt><dd class="x"> Tom &amp; Jerry </dd>"#;
        assert_eq!(parse_original_title(html), Some("Tom & Jerry".into()));
    }

    #[test]
    fn test_parse_original_title_missing() {
        assert_eq!(parse_original_title("<dt>ISBN:</dt><dd>123</dd>"), None);
        assert_eq!(parse_original_title("<dt>Tytuł oryginału:</dt>"), None);
        assert_eq!(parse_original_title("<dt>Tytuł oryginału:</dt><dd> </dd>"), None);
    }

    #[tokio::test]
    async fn test_enrich_resolved() {
        let session = FakeSession::new().page(
            "http://example.com/book",
            detail_page(
                Some(" 9781234567890 "),
                Some("<dt>Tytuł oryginału:</dt>\n<dd>Original Book Title</dd>"),
            ),
        );
        let mut record = record_with_link("Tytuł", "http://example.com/book");

        let outcome = DetailEnricher::new(quick_config())
            .enrich_record(&session, &mut record)
            .await;

        assert_eq!(outcome, EnrichOutcome::Resolved);
        assert_eq!(record.isbn, "9781234567890");
        assert_eq!(record.original_title, "Original Book Title");
        assert_eq!(record.title, "Tytuł");
    }

    #[tokio::test]
    async fn test_enrich_falls_back_to_title() {
        let session = FakeSession::new().page(
            "http://example.com/book",
            detail_page(Some("9780987654321"), Some("<dt>ISBN:</dt><dd>9780987654321</dd>")),
        );
        let mut record = record_with_link("Tytuł Polski 2", "http://example.com/book");

        let outcome = DetailEnricher::new(quick_config())
            .enrich_record(&session, &mut record)
            .await;

        assert_eq!(outcome, EnrichOutcome::Fallback);
        assert_eq!(record.isbn, "9780987654321");
        assert_eq!(record.original_title, "Tytuł Polski 2");
    }

    #[tokio::test]
    async fn test_enrich_without_details_block_or_isbn() {
        let session =
            FakeSession::new().page("http://example.com/book", detail_page(None, None));
        let mut record = record_with_link("Solaris", "http://example.com/book");

        let outcome = DetailEnricher::new(quick_config())
            .enrich_record(&session, &mut record)
            .await;

        assert_eq!(outcome, EnrichOutcome::Fallback);
        assert_eq!(record.isbn, "");
        assert_eq!(record.original_title, "Solaris");
    }

    #[tokio::test]
    async fn test_enrich_navigation_failure_falls_back() {
        let session = FakeSession::new();
        let mut record = record_with_link("Solaris", "http://example.com/gone");
        record.isbn = "keep".into();

        let outcome = DetailEnricher::new(quick_config())
            .enrich_record(&session, &mut record)
            .await;

        assert_eq!(outcome, EnrichOutcome::Fallback);
        assert_eq!(record.isbn, "keep");
        assert_eq!(record.original_title, "Solaris");
    }

    #[tokio::test]
    async fn test_enrich_skips_invalid_links() {
        let session = FakeSession::new();
        let mut empty = record_with_link("Empty", "");
        empty.isbn = "9781111111111".into();
        empty.original_title = "Kept Title".into();
        let mut relative = record_with_link("Relative", "/ksiazka/1");
        relative.isbn = "9782222222222".into();
        relative.original_title = "Other Kept Title".into();

        let enricher = DetailEnricher::new(quick_config());
        assert_eq!(
            enricher.enrich_record(&session, &mut empty).await,
            EnrichOutcome::Skipped
        );
        assert_eq!(
            enricher.enrich_record(&session, &mut relative).await,
            EnrichOutcome::Skipped
        );

        assert!(session.visits().is_empty());
        assert_eq!(empty.isbn, "9781111111111");
        assert_eq!(empty.original_title, "Kept Title");
        assert_eq!(relative.isbn, "9782222222222");
        assert_eq!(relative.original_title, "Other Kept Title");
        assert_eq!(relative.title, "Relative");
    }

    #[tokio::test]
    async fn test_enrich_all_records() {
        let session = FakeSession::new()
            .page(
                "http://example.com/book1",
                detail_page(
                    Some("9781234567890"),
                    Some("<dt>Tytuł oryginału:</dt><dd>Original Title 1</dd>"),
                ),
            )
            .page(
                "http://example.com/book2",
                detail_page(Some("9780987654321"), Some("")),
            );
        let mut records = vec![
            record_with_link("Tytuł Polski 1", "http://example.com/book1"),
            record_with_link("Tytuł Polski 2", "http://example.com/book2"),
            record_with_link("Bez linku", ""),
        ];

        let summary = DetailEnricher::new(quick_config())
            .enrich(&session, &mut records)
            .await;

        assert_eq!(
            summary,
            EnrichSummary {
                resolved: 1,
                fallback: 1,
                skipped: 1
            }
        );
        assert_eq!(summary.visited(), 2);
        assert_eq!(records[0].isbn, "9781234567890");
        assert_eq!(records[0].original_title, "Original Title 1");
        assert_eq!(records[1].isbn, "9780987654321");
        assert_eq!(records[1].original_title, "Tytuł Polski 2");
        assert_eq!(records[2].original_title, "");
        assert_eq!(
            session.visits(),
            vec![
                "http://example.com/book1".to_string(),
                "http://example.com/book2".to_string()
            ]
        );
    }
}
