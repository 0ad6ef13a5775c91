use serde::Serialize;
use tracing::debug;

use hyperdoc_base::{ErrorKind, HyperdocError, HyperdocResult};

use crate::builder::EntryBuilder;
use crate::collector::{EnricherMap, IncludedCollector};
use crate::entry::{Entry, LinkContext};
use crate::item::{Item, ItemRef, resource_key};
use crate::pagination::{DocumentLinks, paginate};
use crate::query::QueryParams;

/* 📖 # Why are errors mutually exclusive with data?

A document either describes resources or describes why it cannot. Mixing the
two would force every consumer to decide which half to trust. The `Document`
constructors enforce the split: the assembly paths never set `errors`, and
`from_error` never sets `data`, `included` or `links`.
*/

/// Document-level metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentMeta {
    /// Total number of items in the collection, not the page.
    pub total: usize,
}

/// The primary `data` section: one entry for single-resource documents, an
/// ordered list for collection documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Single(Entry),
    Collection(Vec<Entry>),
}

/// One consumer-facing error of an error document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorObject {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&HyperdocError> for ErrorObject {
    fn from(err: &HyperdocError) -> Self {
        let title = match err.kind() {
            ErrorKind::NotFound { .. } => "Resource not found",
            ErrorKind::InvalidParameter { .. } => "Invalid parameter",
            ErrorKind::Multiple { .. } => "Multiple errors",
            ErrorKind::Message { .. } => "Internal error",
        };
        Self {
            title: title.to_string(),
            detail: Some(err.to_string()),
        }
    }
}

/// A complete assembled document, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<DocumentLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PrimaryData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<Entry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorObject>>,
}

impl Document {
    /// Build an error document from a failed operation.
    ///
    /// A `Multiple` error is flattened into one error object per contained
    /// error; every other kind yields exactly one.
    pub fn from_error(err: &HyperdocError) -> Self {
        let errors = match err.kind() {
            ErrorKind::Multiple { errors, .. } if !errors.is_empty() => {
                errors.iter().map(ErrorObject::from).collect()
            }
            _ => vec![ErrorObject::from(err)],
        };
        Self {
            meta: None,
            links: None,
            data: None,
            included: None,
            errors: Some(errors),
        }
    }

    /// Serialize the document to a JSON string.
    pub fn to_json(&self) -> HyperdocResult<String> {
        serde_json::to_string(self)
            .map_err(|err| Box::new(HyperdocError::message(format!("serializing document: {err}"))))
    }
}

/// Assembles complete documents from business items.
///
/// The assembler owns the URL context and is reusable across requests; all
/// per-request state lives in the collaborators it constructs per call.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    links: LinkContext,
}

impl DocumentAssembler {
    /// Create an assembler with the given URL context.
    pub fn new(links: LinkContext) -> Self {
        Self { links }
    }

    /// Assemble a single-resource document.
    ///
    /// The item becomes the document's primary `data` entry; everything
    /// reachable through its associations lands in `included`. No pagination
    /// links are emitted.
    pub fn assemble_one(
        &self,
        item: &ItemRef,
        params: &QueryParams,
        enrichers: &EnricherMap,
    ) -> HyperdocResult<Document> {
        if !item.is_available() {
            return Err(Box::new(HyperdocError::not_found(
                item.resource_type(),
                item.id(),
            )));
        }

        debug!(key = %resource_key(item.as_ref()), "assembling single-resource document");

        let builder = EntryBuilder::new(&params.fields, &self.links);
        let entry = self.enrich(enrichers, item, builder.build(item.as_ref())?);

        let roots = std::slice::from_ref(item);
        let included =
            IncludedCollector::new(&params.fields, &self.links, enrichers).collect(roots)?;

        Ok(Document {
            meta: Some(DocumentMeta { total: 1 }),
            links: None,
            data: Some(PrimaryData::Single(entry)),
            included: non_empty(included),
            errors: None,
        })
    }

    /// Assemble a collection document from the items of the current page.
    ///
    /// `items` holds the page window already selected by the domain layer;
    /// `total` is the size of the whole collection and drives the pagination
    /// links. Unavailable items are dropped from the page.
    pub fn assemble_collection(
        &self,
        items: &[ItemRef],
        total: usize,
        params: &QueryParams,
        enrichers: &EnricherMap,
    ) -> HyperdocResult<Document> {
        let page = params.page;
        debug!(
            total,
            offset = page.offset,
            limit = page.limit,
            "assembling collection document"
        );

        let roots: Vec<ItemRef> = items
            .iter()
            .filter(|item| item.is_available())
            .cloned()
            .collect();

        let builder = EntryBuilder::new(&params.fields, &self.links);
        let mut entries = Vec::with_capacity(roots.len());
        for root in &roots {
            let entry = self.enrich(enrichers, root, builder.build(root.as_ref())?);
            entries.push(entry);
        }

        let included =
            IncludedCollector::new(&params.fields, &self.links, enrichers).collect(&roots)?;

        let links = paginate(total, page.offset, page.limit)
            .to_links(self.links.collection_url(), page.limit);

        Ok(Document {
            meta: Some(DocumentMeta { total }),
            links: Some(links),
            data: Some(PrimaryData::Collection(entries)),
            included: non_empty(included),
            errors: None,
        })
    }

    fn enrich(&self, enrichers: &EnricherMap, item: &ItemRef, entry: Entry) -> Entry {
        match enrichers.get(item.resource_type()) {
            Some(enricher) => enricher(item.as_ref(), entry),
            None => entry,
        }
    }
}

fn non_empty(entries: Vec<Entry>) -> Option<Vec<Entry>> {
    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}
