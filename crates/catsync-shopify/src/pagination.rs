//! Cursor state for walking the `products` connection.
//!
//! Each response carries `pageInfo { hasNextPage endCursor }`. The first
//! request is sent with a `null` cursor; every following request passes the
//! previous page's `endCursor` as the `cursor` variable. The walk ends when a
//! page reports `hasNextPage: false`.

use crate::types::PageInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState {
    /// No page requested yet.
    Start,
    /// More pages exist; holds the cursor for the next request.
    Next(String),
    Done,
}

/// Tracks where the next page request should start.
#[derive(Debug, Clone)]
pub struct PageCursor {
    state: CursorState,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCursor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CursorState::Start,
        }
    }

    /// `true` once the last page has been seen.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == CursorState::Done
    }

    /// Value for the `cursor` variable of the next request.
    ///
    /// `None` for the first page (and after the walk is done).
    #[must_use]
    pub fn request_cursor(&self) -> Option<&str> {
        match &self.state {
            CursorState::Next(cursor) => Some(cursor.as_str()),
            CursorState::Start | CursorState::Done => None,
        }
    }

    /// Moves the cursor past a page that was just received.
    ///
    /// A page that claims more pages exist but carries no `endCursor` ends
    /// the walk: requesting again with a `null` cursor would restart from the
    /// first page and never terminate.
    pub fn advance(&mut self, page_info: &PageInfo) {
        self.state = match (page_info.has_next_page, &page_info.end_cursor) {
            (true, Some(cursor)) if !cursor.is_empty() => CursorState::Next(cursor.clone()),
            (true, _) => {
                tracing::warn!("pageInfo.hasNextPage is true without an endCursor; stopping");
                CursorState::Done
            }
            (false, _) => CursorState::Done,
        };
    }
}
