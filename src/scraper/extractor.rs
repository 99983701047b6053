use url::Url;

use crate::domain::shelf::partition_shelves;
use crate::domain::Record;
use crate::scraper::selectors::*;
use crate::scraper::Node;

/// Turns one listing entry node into a [`Record`].
///
/// Each field is looked up on its own; a missing element, attribute or text
/// leaves that field empty and never affects the others.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Relative links are resolved against `base`, the URL of the listing page.
    pub async fn extract<N: Node>(&self, entry: &N, base: Option<&Url>) -> Record {
        let (avg_rating, user_rating) = ratings(entry).await;
        let (reader_count, opinion_count) = captions(entry).await;
        let (shelves, custom_shelves) = shelf_names(entry).await;

        Record {
            id: entry_id(entry).await.unwrap_or_default(),
            title: trimmed_text(entry, TITLE).await.unwrap_or_default(),
            author: trimmed_text(entry, AUTHOR).await.unwrap_or_default(),
            isbn: String::new(),
            series: series(entry).await.unwrap_or_default(),
            avg_rating,
            rating_count: text_of(entry, RATING_COUNT)
                .await
                .map(|t| strip_rating_unit(&t))
                .unwrap_or_default(),
            reader_count,
            opinion_count,
            user_rating,
            link: link(entry)
                .await
                .map(|href| resolve_link(&href, base))
                .unwrap_or_default(),
            read_date: text_of(entry, READ_DATE)
                .await
                .map(|t| strip_read_label(&t))
                .unwrap_or_default(),
            shelves,
            custom_shelves,
            original_title: String::new(),
        }
    }
}

/// Drop the `listBookElement` prefix from an entry's DOM id.
pub fn strip_id_prefix(raw: &str) -> String {
    raw.replace(ENTRY_ID_PREFIX, "")
}

/// Drop the 6-character "Cykl: " label. Text not longer than the label yields "".
pub fn strip_series_label(raw: &str) -> String {
    if raw.chars().count() > CYCLE_LABEL_LEN {
        raw.chars().skip(CYCLE_LABEL_LEN).collect()
    } else {
        String::new()
    }
}

/// "100 ocen" → "100"
pub fn strip_rating_unit(raw: &str) -> String {
    raw.replace(RATING_UNIT, "").trim().to_string()
}

pub fn strip_read_label(raw: &str) -> String {
    raw.replace(READ_DATE_LABEL, "").trim().to_string()
}

/// Make `href` absolute using the page it was found on.
///
/// Without a base, or when joining fails, the trimmed href is kept as is.
pub fn resolve_link(href: &str, base: Option<&Url>) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    match base.and_then(|b| b.join(href).ok()) {
        Some(url) => url.to_string(),
        None => href.to_string(),
    }
}

/// A small-print caption under an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caption {
    Readers(String),
    Opinions(String),
}

pub fn parse_caption(raw: &str) -> Option<Caption> {
    let text = raw.trim();
    if text.contains(READERS_LABEL) {
        Some(Caption::Readers(
            text.replace(READERS_LABEL, "").trim().to_string(),
        ))
    } else if text.contains(OPINIONS_LABEL) {
        Some(Caption::Opinions(
            text.replace(OPINIONS_LABEL, "").trim().to_string(),
        ))
    } else {
        None
    }
}

async fn text_of<N: Node>(node: &N, selector: &str) -> Option<String> {
    let child = node.find(selector).await.ok()??;
    child.text().await.ok()
}

async fn trimmed_text<N: Node>(node: &N, selector: &str) -> Option<String> {
    text_of(node, selector).await.map(|t| t.trim().to_string())
}

async fn entry_id<N: Node>(entry: &N) -> Option<String> {
    let raw = entry.attribute("id").await.ok()??;
    Some(strip_id_prefix(&raw))
}

async fn link<N: Node>(entry: &N) -> Option<String> {
    let anchor = entry.find(LINK).await.ok()??;
    anchor.attribute("href").await.ok()?
}

async fn series<N: Node>(entry: &N) -> Option<String> {
    text_of(entry, CYCLE).await.map(|t| strip_series_label(&t))
}

/// Average and personal rating, resolved by position among the rating blocks.
async fn ratings<N: Node>(entry: &N) -> (String, String) {
    let blocks = entry.find_all(RATING_BLOCK).await.unwrap_or_default();

    let mut values = [String::new(), String::new()];
    for (slot, block) in values.iter_mut().zip(blocks.iter()) {
        if let Some(number) = trimmed_text(block, RATING_NUMBER).await {
            *slot = number;
        }
    }

    let [avg, user] = values;
    (avg, user)
}

async fn captions<N: Node>(entry: &N) -> (String, String) {
    let mut readers = String::new();
    let mut opinions = String::new();

    for caption in entry.find_all(CAPTION).await.unwrap_or_default() {
        let Ok(text) = caption.text().await else {
            continue;
        };
        match parse_caption(&text) {
            Some(Caption::Readers(value)) => readers = value,
            Some(Caption::Opinions(value)) => opinions = value,
            None => {}
        }
    }

    (readers, opinions)
}

async fn shelf_names<N: Node>(entry: &N) -> (String, String) {
    let Ok(Some(container)) = entry.find(SHELF_CONTAINER).await else {
        return (String::new(), String::new());
    };

    let mut names = Vec::new();
    for anchor in container.find_all(SHELF_LINK).await.unwrap_or_default() {
        if let Ok(text) = anchor.text().await {
            names.push(text);
        }
    }

    partition_shelves(names)
}
