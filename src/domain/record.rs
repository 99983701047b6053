use std::collections::HashMap;
use std::fmt;

/// Number of columns in the source CSV layout.
pub const FIELD_COUNT: usize = 15;

/// Column headers written to the source CSV, in positional order.
pub const HEADERS: [&str; FIELD_COUNT] = [
    "ID",
    "Polish Title",
    "Author",
    "ISBN",
    "Series",
    "Average Rating",
    "Rating Count",
    "Reader Count",
    "Opinion Count",
    "User Rating",
    "Link",
    "Read Date",
    "Shelves",
    "Custom Shelves",
    "Original Title",
];

/// Headers used by older Polish-language exports. Accepted when reading keyed rows.
pub const LEGACY_HEADERS: [&str; FIELD_COUNT] = [
    "ID",
    "Polski Tytuł",
    "Autor",
    "ISBN",
    "Cykl",
    "Średnia ocena",
    "Liczba ocen",
    "Czytelnicy",
    "Opinie",
    "Ocena użytkownika",
    "Link",
    "Data przeczytania",
    "Na półkach Głowne",
    "Na półkach Pozostałe",
    "Tytuł",
];

/// One scraped book entry.
///
/// Every field is plain text and defaults to the empty string. Numbers are kept
/// exactly as the site renders them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub series: String,
    pub avg_rating: String,
    pub rating_count: String,
    pub reader_count: String,
    pub opinion_count: String,
    pub user_rating: String,
    pub link: String,
    pub read_date: String,
    pub shelves: String,
    pub custom_shelves: String,
    pub original_title: String,
}

impl Record {
    /// Build a record from positional values.
    ///
    /// Missing trailing values become empty strings; values past the 15th are ignored.
    pub fn from_sequence<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = Self::default();
        let mut values = values.into_iter();
        for slot in record.fields_mut() {
            match values.next() {
                Some(value) => *slot = value.into(),
                None => break,
            }
        }
        record
    }

    /// Positional values, always exactly [`FIELD_COUNT`] long.
    pub fn to_sequence(&self) -> Vec<String> {
        self.fields().iter().map(|s| s.to_string()).collect()
    }

    /// Header-keyed view of the record.
    pub fn to_map(&self) -> HashMap<&'static str, String> {
        HEADERS
            .iter()
            .copied()
            .zip(self.fields().iter().map(|s| s.to_string()))
            .collect()
    }

    /// Build a record from header-keyed values.
    ///
    /// Both the current and the legacy header names are recognized. Missing keys
    /// become empty strings.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let mut record = Self::default();
        for (i, slot) in record.fields_mut().into_iter().enumerate() {
            if let Some(value) = map.get(HEADERS[i]).or_else(|| map.get(LEGACY_HEADERS[i])) {
                *slot = value.clone();
            }
        }
        record
    }

    /// Title used for export: the original title when known, else the local one.
    pub fn display_title(&self) -> &str {
        if self.original_title.is_empty() {
            &self.title
        } else {
            &self.original_title
        }
    }

    /// Whether the record points at a detail page that can be visited.
    pub fn has_valid_link(&self) -> bool {
        !self.link.is_empty() && self.link.starts_with("http")
    }

    fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            &self.id,
            &self.title,
            &self.author,
            &self.isbn,
            &self.series,
            &self.avg_rating,
            &self.rating_count,
            &self.reader_count,
            &self.opinion_count,
            &self.user_rating,
            &self.link,
            &self.read_date,
            &self.shelves,
            &self.custom_shelves,
            &self.original_title,
        ]
    }

    fn fields_mut(&mut self) -> [&mut String; FIELD_COUNT] {
        [
            &mut self.id,
            &mut self.title,
            &mut self.author,
            &mut self.isbn,
            &mut self.series,
            &mut self.avg_rating,
            &mut self.rating_count,
            &mut self.reader_count,
            &mut self.opinion_count,
            &mut self.user_rating,
            &mut self.link,
            &mut self.read_date,
            &mut self.shelves,
            &mut self.custom_shelves,
            &mut self.original_title,
        ]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.author)
    }
}
