/* 📖 # Why model associations as capability traits?

A business item "might" have child items, list associations, properties or
addresses. Modeling each of these as its own capability trait means:

1. **No downcasting**: The traversal asks "does this item expose capability X?"
   via the `as_*` accessors instead of matching on concrete item types
2. **Closed core, open domain**: New item types declare the capabilities they
   have; the traversal code never changes
3. **Honest contracts**: An item without children simply does not implement
   Treeable, rather than returning a meaningless empty list

The `as_*` accessors default to `None`, so an item type only opts into the
capabilities it actually has.
*/

use std::fmt;
use std::sync::Arc;

use hyperdoc_base::HyperdocResult;

/// Attribute map of a resource: string keys to arbitrary JSON values.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Shared reference to a business item.
///
/// Items are handed to the engine by the domain layer and may form arbitrary
/// graphs, including cycles, so they are shared rather than owned.
pub type ItemRef = Arc<dyn Item>;

/// A business item with a globally stable `(resource type, id)` identity.
///
/// The engine consumes items purely through this trait: identity, availability,
/// attributes, and the capability accessors. Loading and mutating items is the
/// domain layer's concern and stays outside the engine.
pub trait Item: Send + Sync {
    /// Returns the resource type of this item (e.g. "product").
    fn resource_type(&self) -> &str;

    /// Returns the identifier of this item, unique within its resource type.
    fn id(&self) -> &str;

    /// Returns false if this item must be invisible to consumers.
    ///
    /// Unavailable items are excluded from traversal and output, including
    /// everything only reachable through them.
    fn is_available(&self) -> bool {
        true
    }

    /// Returns the attribute map of this item.
    ///
    /// A failure here aborts document assembly; the engine never emits a
    /// half-built document.
    fn to_attributes(&self) -> HyperdocResult<Attributes>;

    /// Returns the hierarchical-children capability, if this item has one.
    fn as_treeable(&self) -> Option<&dyn Treeable> {
        None
    }

    /// Returns the list-association capability, if this item has one.
    fn as_list_associated(&self) -> Option<&dyn ListAssociated> {
        None
    }

    /// Returns the property capability, if this item has one.
    fn as_property_associated(&self) -> Option<&dyn PropertyAssociated> {
        None
    }

    /// Returns the address capability, if this item has one.
    fn as_address_associated(&self) -> Option<&dyn AddressAssociated> {
        None
    }
}

/// Capability: an item with an ordered list of hierarchical child items
/// (e.g. parent/child categories).
pub trait Treeable {
    /// Returns the child items, in association order.
    fn children(&self) -> Vec<ItemRef>;
}

/// Capability: an item with an ordered list of list associations, each
/// carrying a target item plus metadata of its own (position, validity, ...).
pub trait ListAssociated {
    /// Returns the list links, in association order.
    fn list_links(&self) -> Vec<ListLink>;
}

/// Capability: an item with attached property items (simple sub-resources).
pub trait PropertyAssociated {
    /// Returns the property items, in association order.
    fn properties(&self) -> Vec<ItemRef>;
}

/// Capability: an item with attached address items.
pub trait AddressAssociated {
    /// Returns the address items, in association order.
    fn addresses(&self) -> Vec<ItemRef>;
}

/// A single list association: the target item, the domain label the
/// association belongs to (e.g. "crossselling"), and the association's own
/// attribute map.
#[derive(Clone)]
pub struct ListLink {
    target: ItemRef,
    domain: String,
    attributes: Attributes,
}

impl ListLink {
    /// Create a list link to `target` under the given domain label.
    pub fn new(target: ItemRef, domain: impl Into<String>) -> Self {
        Self {
            target,
            domain: domain.into(),
            attributes: Attributes::new(),
        }
    }

    /// Attach association metadata (e.g. position or validity dates).
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Returns the target item of this association.
    pub fn target(&self) -> &ItemRef {
        &self.target
    }

    /// Returns the domain label of this association.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the association's own attribute map.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl fmt::Debug for ListLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListLink")
            .field("domain", &self.domain)
            .field("target", &resource_key(self.target.as_ref()))
            .finish()
    }
}

/// The `(resource type, id)` identity pair of an item.
///
/// Within one assembled document a given key appears at most once in
/// `included`, and never when it is also the document's primary identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    resource_type: String,
    id: String,
}

impl ResourceKey {
    /// Create a key from its two components.
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Returns the resource type component.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the id component.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.id)
    }
}

/// Returns the identity key of an item.
pub fn resource_key(item: &dyn Item) -> ResourceKey {
    ResourceKey::new(item.resource_type(), item.id())
}

/// One association edge discovered on an item: the target, the relationship
/// group it is reported under, and inline metadata for list associations.
pub(crate) struct Association {
    pub target: ItemRef,
    pub group: String,
    pub attributes: Option<Attributes>,
}

/// Enumerate every association edge of an item, in capability order
/// (children, list links, properties, addresses) and association order
/// within each capability.
///
/// Tree children, properties and addresses group under the target's resource
/// type; list links group under their domain label.
pub(crate) fn associations(item: &dyn Item) -> Vec<Association> {
    let mut edges = Vec::new();

    if let Some(treeable) = item.as_treeable() {
        for child in treeable.children() {
            let group = child.resource_type().to_string();
            edges.push(Association {
                target: child,
                group,
                attributes: None,
            });
        }
    }

    if let Some(list_associated) = item.as_list_associated() {
        for link in list_associated.list_links() {
            let attributes = if link.attributes().is_empty() {
                None
            } else {
                Some(link.attributes().clone())
            };
            edges.push(Association {
                target: link.target().clone(),
                group: link.domain().to_string(),
                attributes,
            });
        }
    }

    if let Some(property_associated) = item.as_property_associated() {
        for property in property_associated.properties() {
            let group = property.resource_type().to_string();
            edges.push(Association {
                target: property,
                group,
                attributes: None,
            });
        }
    }

    if let Some(address_associated) = item.as_address_associated() {
        for address in address_associated.addresses() {
            let group = address.resource_type().to_string();
            edges.push(Association {
                target: address,
                group,
                attributes: None,
            });
        }
    }

    edges
}
