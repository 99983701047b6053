use serde::Serialize;

use crate::domain::Record;

/// Column headers of the Goodreads import format.
pub const TARGET_HEADERS: [&str; 15] = [
    "Title",
    "Polish Title",
    "Author",
    "ISBN",
    "My Rating",
    "Average Rating",
    "Publisher",
    "Binding",
    "Year Published",
    "Original Publication Year",
    "Date Read",
    "Date Added",
    "Shelves",
    "Bookshelves",
    "My Review",
];

/// One row of the Goodreads import CSV.
///
/// Columns with no source equivalent are always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoodreadsRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Polish Title")]
    pub polish_title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "My Rating")]
    pub my_rating: String,
    #[serde(rename = "Average Rating")]
    pub average_rating: String,
    #[serde(rename = "Publisher")]
    pub publisher: String,
    #[serde(rename = "Binding")]
    pub binding: String,
    #[serde(rename = "Year Published")]
    pub year_published: String,
    #[serde(rename = "Original Publication Year")]
    pub original_publication_year: String,
    #[serde(rename = "Date Read")]
    pub date_read: String,
    #[serde(rename = "Date Added")]
    pub date_added: String,
    #[serde(rename = "Shelves")]
    pub shelves: String,
    #[serde(rename = "Bookshelves")]
    pub bookshelves: String,
    #[serde(rename = "My Review")]
    pub my_review: String,
}

impl From<&Record> for GoodreadsRow {
    fn from(record: &Record) -> Self {
        Self {
            title: record.display_title().to_string(),
            polish_title: record.title.clone(),
            author: record.author.clone(),
            isbn: record.isbn.clone(),
            my_rating: record.user_rating.clone(),
            average_rating: record.avg_rating.clone(),
            date_read: record.read_date.clone(),
            shelves: record.shelves.clone(),
            bookshelves: record.custom_shelves.clone(),
            ..Default::default()
        }
    }
}
