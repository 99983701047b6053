//! CSS selectors and label literals for the lubimyczytac.pl markup.

// Listing page
pub const ENTRY: &str = ".authorAllBooks__single";
pub const NEXT_PAGE: &str = ".next-page";
pub const COOKIE_BUTTON: &str = "button";
pub const COOKIE_ACCEPT_TEXT: &str = "Akcept";
pub const DISABLED_CLASS: &str = "disabled";

// Entry node
pub const ENTRY_ID_PREFIX: &str = "listBookElement";
pub const TITLE: &str = ".authorAllBooks__singleTextTitle";
pub const AUTHOR: &str = ".authorAllBooks__singleTextAuthor";
pub const LINK: &str = "a";
pub const CYCLE: &str = ".listLibrary__info--cycles";
pub const RATING_BLOCK: &str = ".listLibrary__rating";
pub const RATING_NUMBER: &str = ".listLibrary__ratingStarsNumber";
pub const RATING_COUNT: &str = ".listLibrary__ratingAll";
pub const CAPTION: &str = ".small.grey";
pub const READ_DATE: &str = ".authorAllBooks__read-dates";
pub const SHELF_CONTAINER: &str = ".authorAllBooks__singleTextShelfRight";
pub const SHELF_LINK: &str = "a";

/// Length of the "Cykl: " label in front of a series name.
pub const CYCLE_LABEL_LEN: usize = 6;
pub const RATING_UNIT: &str = "ocen";
pub const READERS_LABEL: &str = "Czytelnicy:";
pub const OPINIONS_LABEL: &str = "Opinie:";
pub const READ_DATE_LABEL: &str = "Przeczytał:";

// Detail page
pub const PAGE_READY: &str = "head";
pub const ISBN_META: &str = "meta[property=\"books:isbn\"]";
pub const DETAILS_BLOCK: &str = "#book-details";
pub const ORIGINAL_TITLE_LABEL: &str = "Tytuł oryginału:";
