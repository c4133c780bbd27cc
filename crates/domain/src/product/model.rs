//! Product record.

use chrono::{DateTime, Utc};
use common::EntityId;
use repository::Entity;
use serde::{Deserialize, Serialize};

use super::{Category, Price};

/// Immutable snapshot of a stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: EntityId,
    name: String,
    price: Price,
    category: Category,
    description: String,
    in_stock: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Case-insensitive substring match against name or description.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

/// Validated fields for a product that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub(crate) name: String,
    pub(crate) price: Price,
    pub(crate) category: Category,
    pub(crate) description: String,
    pub(crate) in_stock: bool,
}

impl NewProduct {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }
}

/// Validated partial product update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub(crate) name: Option<String>,
    pub(crate) price: Option<Price>,
    pub(crate) category: Option<Category>,
    pub(crate) description: Option<String>,
    pub(crate) in_stock: Option<bool>,
}

impl ProductChanges {
    /// Returns true if the update leaves every field as it is.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Entity for Product {
    type Id = EntityId;
    type Draft = NewProduct;
    type Changes = ProductChanges;

    const KIND: &'static str = "Product";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn from_draft(id: EntityId, draft: NewProduct, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            category: draft.category,
            description: draft.description,
            in_stock: draft.in_stock,
            created_at: at,
            updated_at: at,
        }
    }

    fn merge(&self, changes: ProductChanges) -> Self {
        Self {
            id: self.id,
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            price: changes.price.unwrap_or(self.price),
            category: changes.category.unwrap_or(self.category),
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            in_stock: changes.in_stock.unwrap_or(self.in_stock),
            created_at: self.created_at,
            updated_at: common::clock::tick_after(self.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> Product {
        Product::from_draft(
            EntityId::new(),
            NewProduct {
                name: "Desk Lamp".to_string(),
                price: Price::from_cents(2499).unwrap(),
                category: Category::Home,
                description: "Adjustable LED desk lamp".to_string(),
                in_stock: true,
            },
            common::clock::now(),
        )
    }

    #[test]
    fn merge_applies_only_present_fields() {
        let product = lamp();
        let merged = product.merge(ProductChanges {
            in_stock: Some(false),
            ..ProductChanges::default()
        });

        assert!(!merged.in_stock());
        assert_eq!(merged.name(), product.name());
        assert_eq!(merged.price(), product.price());
        assert_eq!(merged.created_at(), product.created_at());
        assert!(merged.updated_at() > product.updated_at());
    }

    #[test]
    fn mentions_checks_name_and_description() {
        let product = lamp();
        assert!(product.mentions("lamp"));
        assert!(product.mentions("led"));
        assert!(!product.mentions("chair"));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(lamp()).unwrap();
        assert_eq!(json["price"], serde_json::json!(24.99));
        assert_eq!(json["category"], "home");
        assert_eq!(json["inStock"], true);
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn empty_changes_detected() {
        assert!(ProductChanges::default().is_empty());
        assert!(
            !ProductChanges {
                price: Price::from_cents(1),
                ..ProductChanges::default()
            }
            .is_empty()
        );
    }
}
