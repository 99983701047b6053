//! In-memory document used to exercise the scraper without a browser.
//!
//! Supports the selector subset the scraper uses: `tag`, `.class`, `#id`,
//! `[attr="value"]` and compounds of those (`.small.grey`, `meta[property="x"]`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::{Result, ShelfportError};
use crate::scraper::{Node, Session};

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    tag: String,
    attrs: HashMap<String, String>,
    text: String,
    html: String,
    children: Vec<FakeElement>,
    navigates_to: Option<String>,
    failing: bool,
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn html(mut self, html: &str) -> Self {
        self.html = html.to_string();
        self
    }

    pub fn child(mut self, child: FakeElement) -> Self {
        self.children.push(child);
        self
    }

    /// Clicking this element loads `url` in the session.
    pub fn navigates_to(mut self, url: &str) -> Self {
        self.navigates_to = Some(url.to_string());
        self
    }

    /// Reads and clicks on this element fail.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn matches(&self, selector: &str) -> bool {
        let Some(parts) = SimpleSelector::parse(selector) else {
            return false;
        };

        if let Some(ref tag) = parts.tag {
            if !self.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(ref id) = parts.id {
            if self.attrs.get("id") != Some(id) {
                return false;
            }
        }
        let classes: Vec<&str> = self
            .attrs
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default();
        if !parts.classes.iter().all(|c| classes.contains(&c.as_str())) {
            return false;
        }
        parts
            .attrs
            .iter()
            .all(|(name, value)| self.attrs.get(name) == Some(value))
    }

    fn descendants_matching(&self, selector: &str, out: &mut Vec<FakeElement>) {
        for child in &self.children {
            if child.matches(selector) {
                out.push(child.clone());
            }
            child.descendants_matching(selector, out);
        }
    }
}

#[derive(Debug, Default)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
}

impl SimpleSelector {
    fn parse(selector: &str) -> Option<Self> {
        let mut parsed = Self::default();
        let mut rest = selector.trim();

        let tag_end = rest.find(&['.', '#', '['][..]).unwrap_or(rest.len());
        if tag_end > 0 {
            parsed.tag = Some(rest[..tag_end].to_string());
        }
        rest = &rest[tag_end..];

        while !rest.is_empty() {
            let marker = rest.chars().next()?;
            rest = &rest[1..];
            match marker {
                '.' | '#' => {
                    let end = rest.find(&['.', '#', '['][..]).unwrap_or(rest.len());
                    let name = rest[..end].to_string();
                    if marker == '.' {
                        parsed.classes.push(name);
                    } else {
                        parsed.id = Some(name);
                    }
                    rest = &rest[end..];
                }
                '[' => {
                    let end = rest.find(']')?;
                    let (name, value) = rest[..end].split_once('=')?;
                    parsed
                        .attrs
                        .push((name.to_string(), value.trim_matches('"').to_string()));
                    rest = &rest[end + 1..];
                }
                _ => return None,
            }
        }

        Some(parsed)
    }
}

#[derive(Debug, Default)]
struct FakeState {
    pages: HashMap<String, FakeElement>,
    current: Option<String>,
    visits: Vec<String>,
    clicks: usize,
}

/// A fake browser tab over a fixed set of pages keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct FakeSession {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session with one page already loaded.
    pub fn single(url: &str, root: FakeElement) -> Self {
        let session = Self::new().page(url, root);
        session.state.lock().unwrap().current = Some(url.to_string());
        session
    }

    pub fn page(self, url: &str, root: FakeElement) -> Self {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert(url.to_string(), root);
        self
    }

    /// URLs passed to `navigate`, in order.
    pub fn visits(&self) -> Vec<String> {
        self.state.lock().unwrap().visits.clone()
    }

    pub fn clicks(&self) -> usize {
        self.state.lock().unwrap().clicks
    }

    fn current_root(&self) -> Option<FakeElement> {
        let state = self.state.lock().unwrap();
        let url = state.current.as_ref()?;
        state.pages.get(url).cloned()
    }
}

#[async_trait]
impl Session for FakeSession {
    type Node = FakeNode;

    async fn navigate(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.visits.push(url.to_string());
        if !state.pages.contains_key(url) {
            return Err(ShelfportError::Browser(format!("No such page: {}", url)));
        }
        state.current = Some(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<Option<String>> {
        Ok(self.state.lock().unwrap().current.clone())
    }

    async fn find(&self, selector: &str) -> Result<Option<FakeNode>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<FakeNode>> {
        let Some(root) = self.current_root() else {
            return Ok(Vec::new());
        };
        let mut found = Vec::new();
        if root.matches(selector) {
            found.push(root.clone());
        }
        root.descendants_matching(selector, &mut found);
        Ok(found
            .into_iter()
            .map(|element| FakeNode {
                element,
                state: Arc::clone(&self.state),
            })
            .collect())
    }
}

pub struct FakeNode {
    element: FakeElement,
    state: Arc<Mutex<FakeState>>,
}

impl FakeNode {
    fn check(&self) -> Result<()> {
        if self.element.failing {
            Err(ShelfportError::Browser("stale element".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Node for FakeNode {
    async fn text(&self) -> Result<String> {
        self.check()?;
        Ok(self.element.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.element.attrs.get(name).cloned())
    }

    async fn inner_html(&self) -> Result<String> {
        self.check()?;
        Ok(self.element.html.clone())
    }

    async fn click(&self) -> Result<()> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.clicks += 1;
        if let Some(ref url) = self.element.navigates_to {
            state.current = Some(url.clone());
        }
        Ok(())
    }

    async fn find(&self, selector: &str) -> Result<Option<Self>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self>> {
        let mut found = Vec::new();
        self.element.descendants_matching(selector, &mut found);
        Ok(found
            .into_iter()
            .map(|element| FakeNode {
                element,
                state: Arc::clone(&self.state),
            })
            .collect())
    }
}

/// A listing entry with every field populated.
pub fn entry_fixture(id: &str) -> FakeElement {
    FakeElement::new("div")
        .id(&format!("listBookElement{}", id))
        .class("authorAllBooks__single")
        .child(
            FakeElement::new("a")
                .class("authorAllBooks__singleTextTitle")
                .attr("href", &format!("http://example.com/book{}", id))
                .text(&format!(" Tytuł Polski {} ", id)),
        )
        .child(
            FakeElement::new("div")
                .class("authorAllBooks__singleTextAuthor")
                .text(&format!("Autor {}", id)),
        )
        .child(
            FakeElement::new("div")
                .class("listLibrary__info listLibrary__info--cycles")
                .text(&format!("Cykl: Cykl {}", id)),
        )
        .child(
            FakeElement::new("div").class("listLibrary__rating").child(
                FakeElement::new("span")
                    .class("listLibrary__ratingStarsNumber")
                    .text("4.5"),
            ),
        )
        .child(
            FakeElement::new("div").class("listLibrary__rating").child(
                FakeElement::new("span")
                    .class("listLibrary__ratingStarsNumber")
                    .text("5"),
            ),
        )
        .child(
            FakeElement::new("div")
                .class("listLibrary__ratingAll")
                .text("100 ocen"),
        )
        .child(FakeElement::new("span").class("small grey").text("Czytelnicy: 200"))
        .child(FakeElement::new("span").class("small grey").text("Opinie: 50"))
        .child(
            FakeElement::new("div")
                .class("authorAllBooks__read-dates")
                .text("Przeczytał: 2023-01-01"),
        )
        .child(
            FakeElement::new("div")
                .class("authorAllBooks__singleTextShelfRight")
                .child(FakeElement::new("a").text("Przeczytane"))
                .child(FakeElement::new("a").text("Fantasy"))
                .child(FakeElement::new("a").text("Sci-Fi")),
        )
}

/// A listing page holding the given entries and an optional next-page control.
pub fn listing_page(entries: Vec<FakeElement>, next: Option<FakeElement>) -> FakeElement {
    let mut body = FakeElement::new("body");
    for entry in entries {
        body = body.child(entry);
    }
    if let Some(next) = next {
        body = body.child(next);
    }
    body
}
