use std::collections::{HashMap, HashSet};

use crate::item::Attributes;

/* 📖 # Why is field filtering a pure set intersection?

Sparse fieldsets restrict which attributes are serialized per resource type.
Filtering never mutates the input map and returns a fresh map, which makes it
trivially idempotent: filtering a filtered map again is a no-op. Types without
a configured fieldset pass through unmodified.
*/

/// Per-resource-type allow-lists for sparse fieldsets.
///
/// Built once per request from `fields[<type>]=a,b,c` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec {
    allowed: HashMap<String, HashSet<String>>,
}

impl FieldSpec {
    /// Create an empty spec: every attribute of every type passes through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the allow-list for a resource type from a comma-separated
    /// parameter value (e.g. the raw value of `fields[product]`).
    ///
    /// Empty segments are ignored; `fields[product]=` yields an empty
    /// allow-list, which filters away every attribute of that type.
    pub fn insert_raw(&mut self, resource_type: impl Into<String>, raw: &str) {
        let fields = raw
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect();
        self.allowed.insert(resource_type.into(), fields);
    }

    /// Register the allow-list for a resource type from explicit field names.
    pub fn allow<I, S>(mut self, resource_type: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed.insert(
            resource_type.into(),
            fields.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Returns the allow-list for a resource type, if one was requested.
    pub fn allowed_fields(&self, resource_type: &str) -> Option<&HashSet<String>> {
        self.allowed.get(resource_type)
    }

    /// Returns true if no fieldset was requested for any type.
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Apply the fieldset for `resource_type` to an attribute map.
    ///
    /// Returns a new map containing only the allowed keys. If no fieldset was
    /// requested for the type, the attributes pass through unmodified.
    pub fn filter(&self, resource_type: &str, attributes: &Attributes) -> Attributes {
        match self.allowed.get(resource_type) {
            None => attributes.clone(),
            Some(allowed) => attributes
                .iter()
                .filter(|(key, _)| allowed.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}
