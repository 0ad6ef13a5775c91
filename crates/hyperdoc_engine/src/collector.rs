/* 📖 # Why write a placeholder entry before recursing?

The collector walks an arbitrarily deep, potentially self-referential item
graph. Cycle safety hinges on one ordering rule: an item's key is registered
in the included map *before* the collector recurses into its associations.
When a cycle leads back to an already-registered key, the membership check
stops the recursion in O(1). After the walk over the item's associations
finishes (and the enricher ran), the completed entry overwrites the
placeholder, so consumers only ever see finalized entries.

The alternative would be a two-pass algorithm (discover all keys first, build
entries second) at the cost of an extra traversal; the single-pass
double-write keeps the walk linear in the number of distinct keys.
*/

use std::collections::{HashMap, HashSet};
use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use hyperdoc_base::HyperdocResult;

use crate::builder::EntryBuilder;
use crate::entry::{Entry, LinkContext, RelationshipStub};
use crate::fields::FieldSpec;
use crate::item::{Item, ItemRef, ResourceKey, associations, resource_key};

/// A per-type entry transform, injected by the caller.
///
/// Enrichers let callers attach type-specific extra links or metadata to
/// entries without modifying the traversal itself. An enricher receives the
/// item and the built entry and returns the entry to store.
pub type Enricher = Box<dyn Fn(&dyn Item, Entry) -> Entry + Send + Sync>;

/// Strategy map from resource type to enricher.
#[derive(Default)]
pub struct EnricherMap {
    enrichers: HashMap<String, Enricher>,
}

impl EnricherMap {
    /// Create an empty map: every entry passes through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enricher for a resource type, replacing any previous one.
    pub fn register<F>(&mut self, resource_type: impl Into<String>, enricher: F)
    where
        F: Fn(&dyn Item, Entry) -> Entry + Send + Sync + 'static,
    {
        self.enrichers
            .insert(resource_type.into(), Box::new(enricher));
    }

    /// Returns the enricher registered for a resource type, if any.
    pub fn get(&self, resource_type: &str) -> Option<&Enricher> {
        self.enrichers.get(resource_type)
    }
}

impl fmt::Debug for EnricherMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnricherMap")
            .field("resource_types", &self.enrichers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects the flat, de-duplicated `included` section for a set of roots.
///
/// Freshly constructed per document; the included map holds no state across
/// invocations.
pub struct IncludedCollector<'a> {
    builder: EntryBuilder<'a>,
    enrichers: &'a EnricherMap,
    root_keys: HashSet<ResourceKey>,
    included: IndexMap<String, IndexMap<String, Entry>>,
}

impl<'a> IncludedCollector<'a> {
    /// Create a collector for the given fieldsets, link context and enrichers.
    pub fn new(
        fields: &'a FieldSpec,
        links: &'a LinkContext,
        enrichers: &'a EnricherMap,
    ) -> Self {
        Self {
            builder: EntryBuilder::new(fields, links),
            enrichers,
            root_keys: HashSet::new(),
            included: IndexMap::new(),
        }
    }

    /// Walk the association graphs of all roots and return the flattened
    /// `included` entries.
    ///
    /// Roots themselves never appear in the result; they belong to the
    /// document's primary `data` section. The result is ordered by
    /// first-discovery: resource types in the order they were first seen, ids
    /// within a type in the order they were first seen.
    pub fn collect(mut self, roots: &[ItemRef]) -> HyperdocResult<Vec<Entry>> {
        for root in roots {
            self.root_keys.insert(resource_key(root.as_ref()));
        }

        for root in roots {
            if !root.is_available() {
                continue;
            }
            for association in associations(root.as_ref()) {
                self.visit(&association.target)?;
            }
        }

        Ok(self
            .included
            .into_values()
            .flat_map(IndexMap::into_values)
            .collect())
    }

    fn visit(&mut self, item: &ItemRef) -> HyperdocResult<()> {
        if !item.is_available() {
            debug!(key = %resource_key(item.as_ref()), "skipping unavailable item");
            return Ok(());
        }

        let key = resource_key(item.as_ref());
        if self.root_keys.contains(&key) {
            return Ok(());
        }
        if self.contains(&key) {
            // Already discovered: dedupe and cycle termination in one check.
            return Ok(());
        }

        debug!(key = %key, "including item");

        // First write: provisional entry without relationships, stored before
        // recursing so that cycles back to this key terminate.
        let mut entry = self.builder.build_bare(item.as_ref())?;
        self.insert(&key, entry.clone());

        for association in associations(item.as_ref()) {
            if !association.target.is_available() {
                continue;
            }
            let mut stub = RelationshipStub::new(association.target.as_ref());
            if let Some(attributes) = association.attributes {
                stub = stub.with_attributes(attributes);
            }
            entry.push_stub(&association.group, stub);

            self.visit(&association.target)?;
        }

        let entry = match self.enrichers.get(key.resource_type()) {
            Some(enricher) => enricher(item.as_ref(), entry),
            None => entry,
        };

        // Second write: relationships populated and enricher applied.
        self.insert(&key, entry);
        Ok(())
    }

    fn contains(&self, key: &ResourceKey) -> bool {
        self.included
            .get(key.resource_type())
            .is_some_and(|entries| entries.contains_key(key.id()))
    }

    fn insert(&mut self, key: &ResourceKey, entry: Entry) {
        // IndexMap keeps the original insertion position when a key is
        // overwritten, so the second write does not disturb discovery order.
        self.included
            .entry(key.resource_type().to_string())
            .or_default()
            .insert(key.id().to_string(), entry);
    }
}
