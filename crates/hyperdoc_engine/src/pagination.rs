use serde::Serialize;

/* 📖 # Why compute page offsets separately from URLs?

The pagination arithmetic (which windows exist around the current one) is a
small pure function that is easy to test exhaustively. Turning offsets into
URLs is a separate, equally boring step. Keeping them apart means the
arithmetic tests never touch string formatting.
*/

/// The offsets of the pages surrounding the current window.
///
/// `None` means the corresponding link is absent: there is no first/prev link
/// on the first page and no next/last link on the final page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOffsets {
    pub first: Option<usize>,
    pub prev: Option<usize>,
    pub next: Option<usize>,
    pub last: Option<usize>,
    pub current: usize,
}

/// Compute the page offsets for a collection of `total` items viewed through
/// an `offset`/`limit` window.
///
/// The caller guarantees `limit >= 1` (see [`crate::query::PageRequest`]).
pub fn paginate(total: usize, offset: usize, limit: usize) -> PageOffsets {
    debug_assert!(limit >= 1, "limit must be clamped to >= 1 by the caller");

    let first = if offset == 0 { None } else { Some(0) };
    let prev = if offset < limit {
        None
    } else {
        Some(offset - limit)
    };
    let next = if offset + limit >= total {
        None
    } else {
        Some(offset + limit)
    };
    let last_offset = (total / limit) * limit;
    let last = if last_offset <= offset {
        None
    } else {
        Some(last_offset)
    };

    PageOffsets {
        first,
        prev,
        next,
        last,
        current: offset,
    }
}

impl PageOffsets {
    /// Render the offsets as pagination links for a collection URL.
    pub fn to_links(&self, collection_url: &str, limit: usize) -> DocumentLinks {
        DocumentLinks {
            self_link: page_url(collection_url, self.current, limit),
            first: self.first.map(|offset| page_url(collection_url, offset, limit)),
            prev: self.prev.map(|offset| page_url(collection_url, offset, limit)),
            next: self.next.map(|offset| page_url(collection_url, offset, limit)),
            last: self.last.map(|offset| page_url(collection_url, offset, limit)),
        }
    }
}

/// Top-level pagination links of a collection document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

fn page_url(collection_url: &str, offset: usize, limit: usize) -> String {
    let separator = if collection_url.contains('?') { '&' } else { '?' };
    format!("{collection_url}{separator}page[offset]={offset}&page[limit]={limit}")
}
