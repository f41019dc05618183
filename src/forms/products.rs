use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 256;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
}

/// Request body accepted when creating a product. The optional `tagIds` array
/// lists tags to associate with the new product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Name submitted by the client.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Price in the smallest currency unit.
    #[validate(range(min = 0))]
    pub price_cents: i32,
    /// Units held in stock.
    #[validate(range(min = 0))]
    pub stock: i32,
    /// Optional owning category.
    pub category_id: Option<i32>,
    /// Optional tags to attach to the new product.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Option<Vec<i32>>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct` plus the
    /// deduplicated list of tag ids to associate.
    pub fn into_parts(self) -> ProductFormResult<(NewProduct, Vec<i32>)> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let mut new_product = NewProduct::new(sanitized_name, self.price_cents, self.stock);
        if let Some(category_id) = self.category_id {
            new_product = new_product.with_category(category_id);
        }

        let tag_ids = dedupe_tag_ids(self.tag_ids.unwrap_or_default());

        Ok((new_product, tag_ids))
    }
}

/// Request body accepted when updating a product. Omitted fields keep their
/// stored value; a present `tagIds` array (including an empty one) replaces
/// the product's tag set.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    /// Updated name, when submitted.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    /// Updated price, when submitted.
    #[validate(range(min = 0))]
    pub price_cents: Option<i32>,
    /// Updated stock level, when submitted.
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    /// Updated owning category, when submitted.
    pub category_id: Option<i32>,
    /// Target tag set, when submitted.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Option<Vec<i32>>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct` plus
    /// the target tag set, when one was submitted.
    pub fn into_parts(
        self,
        updated_at: NaiveDateTime,
    ) -> ProductFormResult<(UpdateProduct, Option<Vec<i32>>)> {
        self.validate()?;

        let name = match self.name {
            Some(raw) => {
                let sanitized = sanitize_inline_text(&raw);
                if sanitized.is_empty() {
                    return Err(ProductFormError::EmptyName);
                }
                Some(sanitized)
            }
            None => None,
        };

        let update = UpdateProduct {
            name,
            price_cents: self.price_cents,
            stock: self.stock,
            category_id: self.category_id,
            updated_at,
        };

        let tag_ids = self.tag_ids.map(dedupe_tag_ids);

        Ok((update, tag_ids))
    }
}

fn dedupe_tag_ids(tag_ids: Vec<i32>) -> Vec<i32> {
    let mut seen = HashSet::new();
    tag_ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
