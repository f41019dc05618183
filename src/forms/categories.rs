use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for a category name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category payloads.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
}

/// Request body accepted when creating a category. Unknown fields are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Name submitted by the client.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        Ok(NewCategory::new(sanitized_name))
    }
}

/// Request body accepted when updating a category. Omitted fields keep their
/// stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryForm {
    /// Updated name, when submitted.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
}

impl EditCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(
        self,
        updated_at: NaiveDateTime,
    ) -> CategoryFormResult<UpdateCategory> {
        self.validate()?;

        let name = match self.name {
            Some(raw) => {
                let sanitized = sanitize_inline_text(&raw);
                if sanitized.is_empty() {
                    return Err(CategoryFormError::EmptyName);
                }
                Some(sanitized)
            }
            None => None,
        };

        Ok(UpdateCategory { name, updated_at })
    }
}
