/* 📖 # Why parse the query string by hand?

The engine consumes a handful of well-known parameters (`fields[<type>]`,
`page[offset]`, `page[limit]`, `include`). Splitting on `&` and `=` covers
that contract without pulling in a URL crate; unknown parameters are ignored
so the surrounding request layer can carry its own parameters in the same
query string.
*/

use hyperdoc_base::{HyperdocError, HyperdocResult};
use tracing::debug;

use crate::fields::FieldSpec;

/// Page size applied when the request does not specify `page[limit]`.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Upper cap for `page[limit]`; larger requests are clamped, not rejected.
pub const MAX_PAGE_LIMIT: usize = 250;

/// The offset/limit window requested for a collection.
///
/// Values are clamped on construction: the offset is never negative and the
/// limit always lies in `1..=MAX_PAGE_LIMIT`, so downstream pagination
/// arithmetic can rely on both invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Create a page request, clamping the limit into `1..=MAX_PAGE_LIMIT`.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// The parsed query-parameter contract of a request.
///
/// `fields` and `page` feed the engine directly. `include` names the
/// associations the client asked for; it gates which associations the domain
/// layer eagerly loads before handing items to the engine, and is carried
/// here so the caller can act on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub fields: FieldSpec,
    pub page: PageRequest,
    pub include: Vec<String>,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`).
    ///
    /// Recognized parameters: `fields[<type>]`, `page[offset]`,
    /// `page[limit]`, `include`. Unknown parameters are ignored. Numeric
    /// parameters that fail to parse produce an invalid-parameter error;
    /// negative offsets clamp to zero and out-of-range limits clamp into
    /// `1..=MAX_PAGE_LIMIT`.
    pub fn parse(query: &str) -> HyperdocResult<Self> {
        let mut params = QueryParams::default();
        let mut offset: i64 = 0;
        let mut limit: i64 = DEFAULT_PAGE_LIMIT as i64;

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));

            if let Some(resource_type) = key
                .strip_prefix("fields[")
                .and_then(|rest| rest.strip_suffix(']'))
            {
                params.fields.insert_raw(resource_type, value);
            } else if key == "page[offset]" {
                offset = parse_number(key, value)?;
            } else if key == "page[limit]" {
                limit = parse_number(key, value)?;
            } else if key == "include" {
                params.include = value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .collect();
            } else {
                debug!(key, "ignoring unknown query parameter");
            }
        }

        params.page = PageRequest::new(offset.max(0) as usize, limit.max(1) as usize);
        Ok(params)
    }
}

fn parse_number(name: &str, value: &str) -> HyperdocResult<i64> {
    value.parse::<i64>().map_err(|_| {
        Box::new(HyperdocError::invalid_parameter(
            name,
            format!("'{value}' is not a number"),
        ))
    })
}
