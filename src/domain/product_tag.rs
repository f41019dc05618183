use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation linking a product to a tag record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductTag {
    /// Unique identifier of the product-tag association.
    pub id: i32,
    /// Identifier of the product the tag is attached to.
    pub product_id: i32,
    /// Identifier of the referenced tag record.
    pub tag_id: i32,
    /// Timestamp for when the association was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the association.
    pub updated_at: NaiveDateTime,
}

/// Payload required to associate an existing tag with a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NewProductTag {
    /// Identifier of the product receiving the tag.
    pub product_id: i32,
    /// Identifier of the tag being attached to the product.
    pub tag_id: i32,
}

impl NewProductTag {
    /// Construct a new association payload between a product and a tag.
    pub fn new(product_id: i32, tag_id: i32) -> Self {
        Self { product_id, tag_id }
    }
}

/// Additions and removals needed to turn a stored tag set into a target set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSyncPlan {
    /// Tag identifiers that need a new association row.
    pub tag_ids_to_add: Vec<i32>,
    /// Association row identifiers to delete.
    pub link_ids_to_remove: Vec<i32>,
}

impl TagSyncPlan {
    /// Returns `true` when the plan changes nothing.
    pub fn is_empty(&self) -> bool {
        self.tag_ids_to_add.is_empty() && self.link_ids_to_remove.is_empty()
    }
}

/// Diff the stored associations of a product against the submitted tag ids.
///
/// Duplicate submitted ids collapse to a single addition. Additions are
/// reported in ascending tag order, removals in stored row order.
pub fn plan_sync(existing: &[ProductTag], target_tag_ids: &[i32]) -> TagSyncPlan {
    let current: HashSet<i32> = existing.iter().map(|link| link.tag_id).collect();
    let target: HashSet<i32> = target_tag_ids.iter().copied().collect();

    let mut tag_ids_to_add: Vec<i32> = target.difference(&current).copied().collect();
    tag_ids_to_add.sort_unstable();

    let link_ids_to_remove = existing
        .iter()
        .filter(|link| !target.contains(&link.tag_id))
        .map(|link| link.id)
        .collect();

    TagSyncPlan {
        tag_ids_to_add,
        link_ids_to_remove,
    }
}
