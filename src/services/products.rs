use chrono::Utc;

use crate::domain::product::Product;
use crate::domain::product_tag::NewProductTag;
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Fetches all products with their category and tags attached.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    repo.list_products().map_err(ServiceError::from)
}

/// Fetches one product with its category and tags attached.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a new product and associates the submitted tags with it.
///
/// The returned product is the bare created row; associations are not
/// re-fetched into the response.
pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let (payload, tag_ids) = form
        .into_parts()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let product = repo.create_product(&payload)?;

    if !tag_ids.is_empty() {
        let links: Vec<NewProductTag> = tag_ids
            .iter()
            .map(|tag_id| NewProductTag::new(product.id, *tag_id))
            .collect();
        repo.create_product_tags(&links)?;
    }

    Ok(product)
}

/// Applies a patch to the product row matching `product_id` and, when a tag
/// set was submitted, reconciles the stored associations against it.
///
/// Matching no product row is not an error.
pub fn modify_product<R>(repo: &R, product_id: i32, form: EditProductForm) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let (update, tag_ids) = form
        .into_parts(Utc::now().naive_utc())
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_product(product_id, &update)?;

    if let Some(tag_ids) = tag_ids {
        repo.sync_product_tags(product_id, &tag_ids)?;
    }

    Ok(())
}

/// Deletes the product row matching `product_id`. Matching no row is not an
/// error.
pub fn remove_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::product_tag::TagSyncPlan;
    use crate::repository::mock::MockProductRepository;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn sample_product(id: i32, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price_cents: 1000,
            stock: 5,
            category_id: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
            category: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn get_product_returns_not_found_for_unknown_id() {
        let mut repo = MockProductRepository::new();

        repo.expect_get_product_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = get_product(&repo, 42);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_product_bulk_inserts_submitted_tags() {
        let mut repo = MockProductRepository::new();

        repo.expect_create_product()
            .times(1)
            .withf(|new_product| {
                assert_eq!(new_product.name, "Espresso Beans");
                true
            })
            .returning(|_| Ok(sample_product(9, "Espresso Beans")));

        repo.expect_create_product_tags()
            .times(1)
            .withf(|links| {
                assert_eq!(
                    links,
                    [NewProductTag::new(9, 5), NewProductTag::new(9, 6)]
                );
                true
            })
            .returning(|links| Ok(links.len()));

        let form = AddProductForm {
            name: "Espresso Beans".to_string(),
            price_cents: 1499,
            stock: 10,
            category_id: None,
            tag_ids: Some(vec![5, 6]),
        };

        let created = create_product(&repo, form).expect("expected success");

        assert_eq!(created.id, 9);
    }

    #[test]
    fn create_product_skips_join_insert_without_tags() {
        let mut repo = MockProductRepository::new();

        repo.expect_create_product()
            .times(1)
            .returning(|_| Ok(sample_product(9, "Espresso Beans")));

        let form = AddProductForm {
            name: "Espresso Beans".to_string(),
            price_cents: 1499,
            stock: 10,
            category_id: None,
            tag_ids: None,
        };

        let result = create_product(&repo, form);

        assert!(result.is_ok());
    }

    #[test]
    fn modify_product_syncs_submitted_tag_set() {
        let mut repo = MockProductRepository::new();

        repo.expect_update_product()
            .times(1)
            .withf(|product_id, updates| {
                assert_eq!(*product_id, 7);
                assert_eq!(updates.price_cents, Some(999));
                true
            })
            .returning(|_, _| Ok(1));

        repo.expect_sync_product_tags()
            .times(1)
            .withf(|product_id, tag_ids| {
                assert_eq!(*product_id, 7);
                assert_eq!(tag_ids, [1, 2, 3]);
                true
            })
            .returning(|_, _| Ok(TagSyncPlan::default()));

        let form = EditProductForm {
            name: None,
            price_cents: Some(999),
            stock: None,
            category_id: None,
            tag_ids: Some(vec![1, 2, 3]),
        };

        let result = modify_product(&repo, 7, form);

        assert!(matches!(result, Ok(())));
    }

    #[test]
    fn modify_product_skips_sync_when_tags_omitted() {
        let mut repo = MockProductRepository::new();

        repo.expect_update_product().times(1).returning(|_, _| Ok(1));

        let form = EditProductForm {
            name: Some("Renamed".to_string()),
            price_cents: None,
            stock: None,
            category_id: None,
            tag_ids: None,
        };

        let result = modify_product(&repo, 7, form);

        assert!(matches!(result, Ok(())));
    }

    #[test]
    fn modify_product_tolerates_missing_row() {
        let mut repo = MockProductRepository::new();

        repo.expect_update_product().times(1).returning(|_, _| Ok(0));

        let form = EditProductForm {
            name: Some("Renamed".to_string()),
            price_cents: None,
            stock: None,
            category_id: None,
            tag_ids: None,
        };

        let result = modify_product(&repo, 999, form);

        assert!(matches!(result, Ok(())));
    }

    #[test]
    fn remove_product_ignores_affected_count() {
        let mut repo = MockProductRepository::new();

        repo.expect_delete_product().times(1).returning(|_| Ok(0));

        let result = remove_product(&repo, 999);

        assert!(matches!(result, Ok(())));
    }
}
