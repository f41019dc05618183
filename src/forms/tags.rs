use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::tag::{NewTag, UpdateTag};
use crate::forms::sanitize_inline_text;

/// Maximum allowed length for a tag name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the tag form helpers.
pub type TagFormResult<T> = Result<T, TagFormError>;

/// Errors that can occur while processing tag payloads.
#[derive(Debug, Error)]
pub enum TagFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("tag name cannot be empty")]
    EmptyName,
}

/// Request body accepted when creating a tag. Unknown fields are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTagForm {
    /// Name submitted by the client.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
}

impl AddTagForm {
    /// Validates and sanitizes the payload into a domain `NewTag`.
    pub fn into_new_tag(self) -> TagFormResult<NewTag> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(TagFormError::EmptyName);
        }

        Ok(NewTag::new(sanitized_name))
    }
}

/// Request body accepted when updating a tag. Omitted fields keep their
/// stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct EditTagForm {
    /// Updated name, when submitted.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
}

impl EditTagForm {
    /// Validates and sanitizes the payload into a domain `UpdateTag`.
    pub fn into_update_tag(self, updated_at: NaiveDateTime) -> TagFormResult<UpdateTag> {
        self.validate()?;

        let name = match self.name {
            Some(raw) => {
                let sanitized = sanitize_inline_text(&raw);
                if sanitized.is_empty() {
                    return Err(TagFormError::EmptyName);
                }
                Some(sanitized)
            }
            None => None,
        };

        Ok(UpdateTag { name, updated_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn add_tag_form_sanitizes_and_converts() {
        let form = AddTagForm {
            name: "  Seasonal \t Specials  ".to_string(),
        };

        let new_tag = form.into_new_tag().expect("expected conversion to succeed");

        assert_eq!(new_tag.name, "Seasonal Specials");
    }

    #[test]
    fn add_tag_form_rejects_empty_name() {
        let form = AddTagForm {
            name: "   ".to_string(),
        };

        let result = form.into_new_tag();

        assert!(matches!(result, Err(TagFormError::EmptyName)));
    }

    #[test]
    fn edit_tag_form_builds_update() {
        let updated_at = NaiveDate::from_ymd_opt(2023, 11, 14)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid timestamp");
        let form = EditTagForm {
            name: Some("  Limited\nEdition  ".to_string()),
        };

        let update = form
            .into_update_tag(updated_at)
            .expect("expected payload conversion to succeed");

        assert_eq!(update.name.as_deref(), Some("Limited Edition"));
        assert_eq!(update.updated_at, updated_at);
    }

    #[test]
    fn edit_tag_form_rejects_blank_name() {
        let form = EditTagForm {
            name: Some("  ".to_string()),
        };

        let updated_at = NaiveDate::from_ymd_opt(2023, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid timestamp");

        let result = form.into_update_tag(updated_at);

        assert!(matches!(result, Err(TagFormError::EmptyName)));
    }
}
