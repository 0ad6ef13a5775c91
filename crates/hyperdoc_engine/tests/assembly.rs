//! End-to-end assembly over a small shop catalog: products with categories,
//! manufacturers, addresses and a cross-selling cycle between products.

use std::sync::{Arc, RwLock};

use expect_test::expect;
use serde_json::json;

use hyperdoc_base::HyperdocResult;
use hyperdoc_engine::{
    AddressAssociated, Attributes, Document, DocumentAssembler, EnricherMap, Item, ItemRef,
    LinkContext, ListAssociated, ListLink, QueryParams, Treeable,
};

struct ShopItem {
    resource_type: &'static str,
    id: &'static str,
    attributes: Attributes,
    children: RwLock<Vec<ItemRef>>,
    links: RwLock<Vec<ListLink>>,
    addresses: RwLock<Vec<ItemRef>>,
}

impl ShopItem {
    fn new(
        resource_type: &'static str,
        id: &'static str,
        attributes: serde_json::Value,
    ) -> Arc<Self> {
        let attributes = match attributes {
            serde_json::Value::Object(map) => map,
            _ => panic!("attributes must be a JSON object"),
        };
        Arc::new(Self {
            resource_type,
            id,
            attributes,
            children: RwLock::new(Vec::new()),
            links: RwLock::new(Vec::new()),
            addresses: RwLock::new(Vec::new()),
        })
    }

    fn add_child(&self, child: ItemRef) {
        self.children.write().unwrap().push(child);
    }

    fn add_link(&self, link: ListLink) {
        self.links.write().unwrap().push(link);
    }

    fn add_address(&self, address: ItemRef) {
        self.addresses.write().unwrap().push(address);
    }
}

impl Item for ShopItem {
    fn resource_type(&self) -> &str {
        self.resource_type
    }

    fn id(&self) -> &str {
        self.id
    }

    fn to_attributes(&self) -> HyperdocResult<Attributes> {
        Ok(self.attributes.clone())
    }

    fn as_treeable(&self) -> Option<&dyn Treeable> {
        Some(self)
    }

    fn as_list_associated(&self) -> Option<&dyn ListAssociated> {
        Some(self)
    }

    fn as_address_associated(&self) -> Option<&dyn AddressAssociated> {
        Some(self)
    }
}

impl Treeable for ShopItem {
    fn children(&self) -> Vec<ItemRef> {
        self.children.read().unwrap().clone()
    }
}

impl ListAssociated for ShopItem {
    fn list_links(&self) -> Vec<ListLink> {
        self.links.read().unwrap().clone()
    }
}

impl AddressAssociated for ShopItem {
    fn addresses(&self) -> Vec<ItemRef> {
        self.addresses.read().unwrap().clone()
    }
}

/// Two products cross-selling each other, one with a category tree, a
/// manufacturer and the manufacturer's address.
fn catalog() -> (Arc<ShopItem>, Arc<ShopItem>) {
    let alpha = ShopItem::new("product", "p100", json!({"name": "Alpha Widget", "price": 19.5}));
    let beta = ShopItem::new("product", "p200", json!({"name": "Beta Widget", "price": 7.25}));

    let tools = ShopItem::new("category", "c10", json!({"name": "Tools"}));
    let hand_tools = ShopItem::new("category", "c20", json!({"name": "Hand Tools"}));
    tools.add_child(hand_tools);
    alpha.add_child(tools);

    let acme = ShopItem::new("manufacturer", "m1", json!({"name": "Acme"}));
    let headquarters = ShopItem::new("address", "a1", json!({"city": "Duckburg"}));
    acme.add_address(headquarters);
    alpha.add_link(ListLink::new(acme, "manufacturer"));

    let position = match json!({"position": 1}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    alpha.add_link(ListLink::new(beta.clone(), "crossselling").with_attributes(position));
    beta.add_link(ListLink::new(alpha.clone(), "crossselling"));

    (alpha, beta)
}

fn assembler() -> DocumentAssembler {
    DocumentAssembler::new(LinkContext::new(
        "https://shop.example/api/{type}/{id}",
        "https://shop.example/api/products",
    ))
}

#[test]
fn test_collection_document_over_cyclic_catalog() {
    let (alpha, beta) = catalog();
    let items: Vec<ItemRef> = vec![alpha, beta];

    let params = QueryParams::parse("page[offset]=0&page[limit]=20").unwrap();
    let document = assembler()
        .assemble_collection(&items, 95, &params, &EnricherMap::new())
        .unwrap();

    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(
        value,
        json!({
            "meta": {"total": 95},
            "links": {
                "self": "https://shop.example/api/products?page[offset]=0&page[limit]=20",
                "next": "https://shop.example/api/products?page[offset]=20&page[limit]=20",
                "last": "https://shop.example/api/products?page[offset]=80&page[limit]=20"
            },
            "data": [
                {
                    "id": "p100",
                    "type": "product",
                    "attributes": {"name": "Alpha Widget", "price": 19.5},
                    "links": {"self": "https://shop.example/api/product/p100"},
                    "relationships": {
                        "category": {"data": [{"id": "c10", "type": "category"}]},
                        "manufacturer": {"data": [{"id": "m1", "type": "manufacturer"}]},
                        "crossselling": {
                            "data": [
                                {"id": "p200", "type": "product", "attributes": {"position": 1}}
                            ]
                        }
                    }
                },
                {
                    "id": "p200",
                    "type": "product",
                    "attributes": {"name": "Beta Widget", "price": 7.25},
                    "links": {"self": "https://shop.example/api/product/p200"},
                    "relationships": {
                        "crossselling": {"data": [{"id": "p100", "type": "product"}]}
                    }
                }
            ],
            "included": [
                {
                    "id": "c10",
                    "type": "category",
                    "attributes": {"name": "Tools"},
                    "links": {"self": "https://shop.example/api/category/c10"},
                    "relationships": {
                        "category": {"data": [{"id": "c20", "type": "category"}]}
                    }
                },
                {
                    "id": "c20",
                    "type": "category",
                    "attributes": {"name": "Hand Tools"},
                    "links": {"self": "https://shop.example/api/category/c20"}
                },
                {
                    "id": "m1",
                    "type": "manufacturer",
                    "attributes": {"name": "Acme"},
                    "links": {"self": "https://shop.example/api/manufacturer/m1"},
                    "relationships": {
                        "address": {"data": [{"id": "a1", "type": "address"}]}
                    }
                },
                {
                    "id": "a1",
                    "type": "address",
                    "attributes": {"city": "Duckburg"},
                    "links": {"self": "https://shop.example/api/address/a1"}
                }
            ]
        })
    );
}

#[test]
fn test_included_keeps_first_discovery_order() {
    let (alpha, beta) = catalog();
    let items: Vec<ItemRef> = vec![alpha, beta];

    let document = assembler()
        .assemble_collection(&items, 2, &QueryParams::default(), &EnricherMap::new())
        .unwrap();

    let ids: Vec<&str> = document
        .included
        .as_ref()
        .unwrap()
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();
    assert_eq!(ids, ["c10", "c20", "m1", "a1"]);
}

#[test]
fn test_single_resource_document_with_sparse_fieldsets() {
    let (alpha, _beta) = catalog();
    let item: ItemRef = alpha;

    let params = QueryParams::parse("fields[product]=name&fields[category]=name").unwrap();
    let document = assembler()
        .assemble_one(&item, &params, &EnricherMap::new())
        .unwrap();

    let value = serde_json::to_value(&document).unwrap();
    // Product attributes are narrowed to `name`; the cross-sold product
    // appears in `included` because only the requested root is excluded.
    assert_eq!(value["data"]["attributes"], json!({"name": "Alpha Widget"}));
    assert_eq!(value["meta"], json!({"total": 1}));
    assert!(value.get("links").is_none());

    let included = document.included.unwrap();
    let beta = included.iter().find(|entry| entry.id == "p200").unwrap();
    assert_eq!(beta.attributes.len(), 1);
    assert!(beta.attributes.contains_key("name"));
    // Unconfigured types keep all their attributes.
    let address = included.iter().find(|entry| entry.id == "a1").unwrap();
    assert!(address.attributes.contains_key("city"));
}

#[test]
fn test_enricher_applies_to_primary_and_included_entries() {
    let (alpha, beta) = catalog();
    let items: Vec<ItemRef> = vec![alpha, beta];

    let mut enrichers = EnricherMap::new();
    enrichers.register("category", |_item, mut entry| {
        entry.attributes.insert("kind".to_string(), json!("category"));
        entry
    });
    enrichers.register("product", |_item, mut entry| {
        entry.attributes.insert("kind".to_string(), json!("product"));
        entry
    });

    let document = assembler()
        .assemble_collection(&items, 2, &QueryParams::default(), &enrichers)
        .unwrap();

    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(value["data"][0]["attributes"]["kind"], json!("product"));
    assert_eq!(value["included"][0]["attributes"]["kind"], json!("category"));
    // Types without a registered enricher pass through untouched.
    assert!(value["included"][3]["attributes"].get("kind").is_none());
}

#[test]
fn test_invalid_query_becomes_error_document() {
    let result = QueryParams::parse("page[limit]=lots");
    let err = result.unwrap_err();

    let document = Document::from_error(&err);
    let json = document.to_json().unwrap();
    expect![[r#"{"errors":[{"title":"Invalid parameter","detail":"invalid parameter 'page[limit]': 'lots' is not a number"}]}"#]]
        .assert_eq(&json);
}
