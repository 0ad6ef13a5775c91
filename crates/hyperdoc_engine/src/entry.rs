/* 📖 # Why use serde for the wire document shapes?

Manual JSON string construction using format!() is error-prone and difficult to maintain.
Using serde with derive(Serialize) provides:

1. **Type safety**: Structs define the schema, compiler catches mismatches
2. **Automatic escaping**: serde_json handles all escaping correctly
3. **Maintainability**: Change the struct, serialization updates automatically

The key names of these structs are a contract with consumers and must be
preserved bit-for-bit; renames are pinned with `#[serde(rename)]`.
*/

use indexmap::IndexMap;
use serde::Serialize;

use crate::item::{Attributes, Item};

/// One resource entry of a document: identity, attributes, links and
/// first-level relationship pointers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<EntryLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<IndexMap<String, Relationship>>,
}

impl Entry {
    /// Append a relationship stub under the given group, creating the
    /// `relationships` section and the group on first use.
    ///
    /// Groups keep first-discovery order, as do the stubs within a group.
    pub fn push_stub(&mut self, group: &str, stub: RelationshipStub) {
        self.relationships
            .get_or_insert_with(IndexMap::new)
            .entry(group.to_string())
            .or_default()
            .data
            .push(stub);
    }
}

/// The ordered relationship pointers of one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Relationship {
    pub data: Vec<RelationshipStub>,
}

/// A minimal `{id, type}` pointer from one entry to another, optionally
/// carrying the attributes of the association itself (list-link metadata).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipStub {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl RelationshipStub {
    /// Create a stub pointing at an item.
    pub fn new(item: &dyn Item) -> Self {
        Self {
            id: item.id().to_string(),
            resource_type: item.resource_type().to_string(),
            attributes: None,
        }
    }

    /// Attach the association's own attributes to the stub.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// Entry-level links; currently only the `self` link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryLinks {
    #[serde(rename = "self")]
    pub self_link: String,
}

/// Caller-supplied URL context for link generation.
///
/// The entry template carries `{type}` and `{id}` placeholders; the
/// collection URL is the base for pagination links. The engine treats both
/// as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkContext {
    entry_template: String,
    collection_url: String,
}

impl LinkContext {
    /// Create a link context from an entry URL template and a collection URL.
    ///
    /// # Examples
    /// ```
    /// use hyperdoc_engine::LinkContext;
    ///
    /// let links = LinkContext::new("/api/{type}/{id}", "/api/products");
    /// assert_eq!(links.entry_link("product", "42"), "/api/product/42");
    /// ```
    pub fn new(entry_template: impl Into<String>, collection_url: impl Into<String>) -> Self {
        Self {
            entry_template: entry_template.into(),
            collection_url: collection_url.into(),
        }
    }

    /// Render the self link for a resource identity.
    pub fn entry_link(&self, resource_type: &str, id: &str) -> String {
        self.entry_template
            .replace("{type}", resource_type)
            .replace("{id}", id)
    }

    /// Returns the collection URL used as the base for pagination links.
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }
}
