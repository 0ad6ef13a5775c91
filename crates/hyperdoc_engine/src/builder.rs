use hyperdoc_base::HyperdocResult;

use crate::entry::{Entry, EntryLinks, LinkContext, RelationshipStub};
use crate::fields::FieldSpec;
use crate::item::{Item, associations};

/* 📖 # Why does the entry builder not recurse?

Building one entry and walking the association graph are different jobs. The
builder turns a single item into its entry: identity, filtered attributes,
self link, and first-level relationship stubs. Expanding those stubs into the
`included` section is the collector's job; keeping recursion out of the
builder means the collector fully owns cycle handling.
*/

/// Builds one resource entry from one item.
pub struct EntryBuilder<'a> {
    fields: &'a FieldSpec,
    links: &'a LinkContext,
}

impl<'a> EntryBuilder<'a> {
    /// Create a builder for the given fieldsets and link context.
    pub fn new(fields: &'a FieldSpec, links: &'a LinkContext) -> Self {
        Self { fields, links }
    }

    /// Build the full entry for an item: identity, filtered attributes, self
    /// link, and one relationship stub per available associated item.
    ///
    /// An item with no capabilities (or no available targets) yields an entry
    /// without a `relationships` section.
    pub fn build(&self, item: &dyn Item) -> HyperdocResult<Entry> {
        let mut entry = self.build_bare(item)?;

        for association in associations(item) {
            if !association.target.is_available() {
                continue;
            }
            let mut stub = RelationshipStub::new(association.target.as_ref());
            if let Some(attributes) = association.attributes {
                stub = stub.with_attributes(attributes);
            }
            entry.push_stub(&association.group, stub);
        }

        Ok(entry)
    }

    /// Build the entry without relationship stubs.
    ///
    /// Used by the collector as the provisional entry it stores before
    /// recursing into the item's associations.
    pub(crate) fn build_bare(&self, item: &dyn Item) -> HyperdocResult<Entry> {
        let attributes = self.fields.filter(item.resource_type(), &item.to_attributes()?);

        Ok(Entry {
            id: item.id().to_string(),
            resource_type: item.resource_type().to_string(),
            attributes,
            links: Some(EntryLinks {
                self_link: self.links.entry_link(item.resource_type(), item.id()),
            }),
            relationships: None,
        })
    }
}
