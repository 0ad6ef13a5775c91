pub mod assembler;
pub mod builder;
pub mod collector;
pub mod entry;
pub mod fields;
pub mod item;
pub mod pagination;
pub mod query;

pub use assembler::{Document, DocumentAssembler, DocumentMeta, ErrorObject, PrimaryData};
pub use builder::EntryBuilder;
pub use collector::{Enricher, EnricherMap, IncludedCollector};
pub use entry::{Entry, EntryLinks, LinkContext, Relationship, RelationshipStub};
pub use fields::FieldSpec;
pub use item::{
    AddressAssociated, Attributes, Item, ItemRef, ListAssociated, ListLink, PropertyAssociated,
    ResourceKey, Treeable, resource_key,
};
pub use pagination::{DocumentLinks, PageOffsets, paginate};
pub use query::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, PageRequest, QueryParams};
