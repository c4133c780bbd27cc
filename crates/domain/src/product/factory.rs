//! Product input types and the factory that validates them.

use chrono::{DateTime, Utc};
use common::EntityId;
use repository::Entity;
use serde::Deserialize;

use crate::error::{ValidationError, Violations};
use crate::fields::char_len_within;

use super::{Category, NewProduct, Price, Product, ProductChanges};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 200;
const DESCRIPTION_MIN: usize = 10;
const DESCRIPTION_MAX: usize = 1000;

/// Raw fields for creating a product, as received from a caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Defaults to true when absent.
    pub in_stock: Option<bool>,
}

impl CreateProduct {
    /// Creates input with every required field set.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            category: Some(category.into()),
            description: Some(description.into()),
            in_stock: None,
        }
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }
}

/// Raw partial update for a product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub in_stock: Option<bool>,
}

/// Validates and normalizes raw product fields.
pub struct ProductFactory;

impl ProductFactory {
    /// Checks every field of a new product.
    pub fn draft(input: &CreateProduct) -> Result<NewProduct, ValidationError> {
        let mut violations = Violations::default();

        let name = required_text(input.name.as_deref(), "name", "Name", &mut violations)
            .and_then(|name| check_name(name, &mut violations));

        let price = match input.price {
            None => {
                violations.push("price", "Price is required");
                None
            }
            Some(amount) => check_price(amount, &mut violations),
        };

        let category = match input.category.as_deref() {
            None => {
                violations.push("category", "Category is required");
                None
            }
            Some(raw) => check_category(raw, &mut violations),
        };

        let description = required_text(
            input.description.as_deref(),
            "description",
            "Description",
            &mut violations,
        )
        .and_then(|description| check_description(description, &mut violations));

        match (name, price, category, description) {
            (Some(name), Some(price), Some(category), Some(description)) => {
                violations.finish(NewProduct {
                    name,
                    price,
                    category,
                    description,
                    in_stock: input.in_stock.unwrap_or(true),
                })
            }
            // At least one violation was recorded on every path that yields `None`.
            _ => Err(violations.into_error()),
        }
    }

    /// Checks only the fields present in `input`.
    pub fn changes(input: &UpdateProduct) -> Result<ProductChanges, ValidationError> {
        let mut violations = Violations::default();

        let name = input
            .name
            .as_deref()
            .and_then(|name| check_name(name.trim(), &mut violations));
        let price = input
            .price
            .and_then(|amount| check_price(amount, &mut violations));
        let category = input
            .category
            .as_deref()
            .and_then(|raw| check_category(raw, &mut violations));
        let description = input
            .description
            .as_deref()
            .and_then(|description| check_description(description.trim(), &mut violations));

        violations.finish(ProductChanges {
            name,
            price,
            category,
            description,
            in_stock: input.in_stock,
        })
    }

    /// Builds a complete product snapshot from raw fields.
    pub fn create(
        id: EntityId,
        input: &CreateProduct,
        at: DateTime<Utc>,
    ) -> Result<Product, ValidationError> {
        Ok(Product::from_draft(id, Self::draft(input)?, at))
    }

    /// Applies a raw partial update to an existing snapshot.
    pub fn merge(existing: &Product, input: &UpdateProduct) -> Result<Product, ValidationError> {
        Ok(existing.merge(Self::changes(input)?))
    }
}

fn required_text<'a>(
    raw: Option<&'a str>,
    field: &'static str,
    label: &str,
    violations: &mut Violations,
) -> Option<&'a str> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text),
        _ => {
            violations.push(field, format!("{label} is required"));
            None
        }
    }
}

fn check_name(name: &str, violations: &mut Violations) -> Option<String> {
    if char_len_within(name, NAME_MIN, NAME_MAX) {
        Some(name.to_string())
    } else {
        violations.push(
            "name",
            format!("Name must be between {NAME_MIN} and {NAME_MAX} characters"),
        );
        None
    }
}

fn check_description(description: &str, violations: &mut Violations) -> Option<String> {
    if char_len_within(description, DESCRIPTION_MIN, DESCRIPTION_MAX) {
        Some(description.to_string())
    } else {
        violations.push(
            "description",
            format!(
                "Description must be between {DESCRIPTION_MIN} and {DESCRIPTION_MAX} characters"
            ),
        );
        None
    }
}

fn check_price(amount: f64, violations: &mut Violations) -> Option<Price> {
    let price = Price::from_decimal(amount);
    if price.is_none() {
        violations.push(
            "price",
            format!("Price must be a positive number no greater than {}", Price::MAX),
        );
    }
    price
}

fn check_category(raw: &str, violations: &mut Violations) -> Option<Category> {
    match raw.parse::<Category>() {
        Ok(category) => Some(category),
        Err(_) => {
            let allowed: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
            violations.push(
                "category",
                format!("Category must be one of: {}", allowed.join(", ")),
            );
            None
        }
    }
}
