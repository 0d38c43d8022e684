//! This modules defines the common functionality for paging data.
//!
//! Tables show the first page of rows and request the next page when the last
//! row scrolls into view. Paging happens on an already loaded list.
//!
//! The next page is located by the ID of the last row the client was sent,
//! not by a numeric offset, so rows deleted from the page already on screen
//! do not shift later rows out of view.

use serde::{Deserialize, Serialize};

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The maximum number of rows to send per request.
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { page_size: 20 }
    }
}

/// The position of the last row a client has been sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// The ID of the last row sent.
    pub after: String,
    /// The creation time of the last row sent, used when that row no longer exists.
    pub created_at: i64,
}

/// The query parameters for requesting a page of rows.
///
/// Without a cursor the first page is returned.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageQuery {
    /// The ID of the last row the client has.
    #[serde(default)]
    pub after: Option<String>,
    /// The creation time of the last row the client has.
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl PageQuery {
    /// The cursor described by the query, if both parts are present.
    pub fn cursor(&self) -> Option<Cursor> {
        match (&self.after, self.created_at) {
            (Some(after), Some(created_at)) => Some(Cursor {
                after: after.clone(),
                created_at,
            }),
            _ => None,
        }
    }
}

/// A row that can be paged through.
///
/// Lists are expected to be ordered newest first.
pub trait PageItem {
    /// The unique ID of the row.
    fn page_id(&self) -> &str;

    /// When the row was created.
    fn page_timestamp(&self) -> i64;

    /// The cursor pointing just past this row.
    fn cursor(&self) -> Cursor {
        Cursor {
            after: self.page_id().to_owned(),
            created_at: self.page_timestamp(),
        }
    }
}

/// A slice of rows and the cursor for the page after it, if there is one.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub next_cursor: Option<Cursor>,
}

/// Find where the page after `cursor` starts in `items`.
///
/// If the cursor's row has since been deleted, the page starts at the first
/// row created before it.
fn start_index<T: PageItem>(items: &[T], cursor: &Cursor) -> usize {
    match items.iter().position(|item| item.page_id() == cursor.after) {
        Some(index) => index + 1,
        None => items
            .iter()
            .position(|item| item.page_timestamp() < cursor.created_at)
            .unwrap_or(items.len()),
    }
}

/// Take up to `page_size` items from `items` that come after `cursor`.
///
/// No cursor gives the first page. A `page_size` of zero is treated as one
/// so that scrolling always makes progress.
pub fn get_page<'a, T: PageItem>(
    items: &'a [T],
    cursor: Option<&Cursor>,
    page_size: usize,
) -> Page<'a, T> {
    let page_size = page_size.max(1);
    let start = cursor.map_or(0, |cursor| start_index(items, cursor));
    let end = start.saturating_add(page_size).min(items.len());
    let page = &items[start..end];

    Page {
        items: page,
        next_cursor: match page.last() {
            Some(last) if end < items.len() => Some(last.cursor()),
            _ => None,
        },
    }
}

/// The URL for requesting the page of rows after `cursor` from `endpoint`.
pub fn page_url(endpoint: &str, cursor: &Cursor) -> String {
    match serde_urlencoded::to_string(cursor) {
        Ok(query) => format!("{endpoint}?{query}"),
        Err(error) => {
            tracing::error!("could not encode page cursor {cursor:?}: {error}");
            endpoint.to_owned()
        }
    }
}
