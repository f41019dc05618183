use storefront::domain::tag::NewTag;
use storefront::forms::products::{AddProductForm, EditProductForm};
use storefront::repository::{DieselRepository, ProductReader, TagWriter};
use storefront::services::ServiceError;
use storefront::services::products;

mod common;

#[test]
fn create_product_stores_tag_associations() {
    let test_db = common::TestDb::new("service_create_product_stores_tag_associations.db");
    let repo = DieselRepository::new(test_db.pool());

    let organic = repo.create_tag(&NewTag::new("Organic")).expect("create tag");
    let seasonal = repo
        .create_tag(&NewTag::new("Seasonal"))
        .expect("create tag");

    let form = AddProductForm {
        name: "Espresso Beans".to_string(),
        price_cents: 1499,
        stock: 10,
        category_id: None,
        tag_ids: Some(vec![organic.id, seasonal.id]),
    };

    let created = products::create_product(&repo, form).expect("expected product creation");
    // The created row is returned bare; associations land in the join table.
    assert!(created.tags.is_empty());

    let links = repo.list_product_tags(created.id).expect("list links");
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|link| link.product_id == created.id));
}

#[test]
fn create_product_rejects_unknown_tag() {
    let test_db = common::TestDb::new("service_create_product_rejects_unknown_tag.db");
    let repo = DieselRepository::new(test_db.pool());

    let form = AddProductForm {
        name: "Espresso Beans".to_string(),
        price_cents: 1499,
        stock: 10,
        category_id: None,
        tag_ids: Some(vec![9999]),
    };

    let result = products::create_product(&repo, form);
    assert!(matches!(result, Err(ServiceError::Repository(_))));

    // The product row survives the failed join insert; the two steps do not
    // share a transaction.
    let remaining = products::list_products(&repo).expect("list products");
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].tags.is_empty());
}

#[test]
fn modify_product_replaces_tag_set() {
    let test_db = common::TestDb::new("service_modify_product_replaces_tag_set.db");
    let repo = DieselRepository::new(test_db.pool());

    let organic = repo.create_tag(&NewTag::new("Organic")).expect("create tag");
    let seasonal = repo
        .create_tag(&NewTag::new("Seasonal"))
        .expect("create tag");

    let form = AddProductForm {
        name: "Espresso Beans".to_string(),
        price_cents: 1499,
        stock: 10,
        category_id: None,
        tag_ids: Some(vec![organic.id]),
    };
    let created = products::create_product(&repo, form).expect("expected product creation");

    let form = EditProductForm {
        name: None,
        price_cents: Some(999),
        stock: None,
        category_id: None,
        tag_ids: Some(vec![seasonal.id]),
    };
    products::modify_product(&repo, created.id, form).expect("expected product update");

    let loaded = products::get_product(&repo, created.id).expect("product should exist");
    assert_eq!(loaded.price_cents, 999);
    assert_eq!(loaded.tags.len(), 1);
    assert_eq!(loaded.tags[0].name, "Seasonal");
}

#[test]
fn modify_product_keeps_tags_when_field_is_omitted() {
    let test_db = common::TestDb::new("service_modify_product_keeps_tags_when_omitted.db");
    let repo = DieselRepository::new(test_db.pool());

    let organic = repo.create_tag(&NewTag::new("Organic")).expect("create tag");

    let form = AddProductForm {
        name: "Espresso Beans".to_string(),
        price_cents: 1499,
        stock: 10,
        category_id: None,
        tag_ids: Some(vec![organic.id]),
    };
    let created = products::create_product(&repo, form).expect("expected product creation");

    let form = EditProductForm {
        name: Some("Decaf Beans".to_string()),
        price_cents: None,
        stock: None,
        category_id: None,
        tag_ids: None,
    };
    products::modify_product(&repo, created.id, form).expect("expected product update");

    let loaded = products::get_product(&repo, created.id).expect("product should exist");
    assert_eq!(loaded.name, "Decaf Beans");
    assert_eq!(loaded.tags.len(), 1);
}

#[test]
fn remove_product_cascades_to_associations() {
    let test_db = common::TestDb::new("service_remove_product_cascades_to_associations.db");
    let repo = DieselRepository::new(test_db.pool());

    let organic = repo.create_tag(&NewTag::new("Organic")).expect("create tag");

    let form = AddProductForm {
        name: "Espresso Beans".to_string(),
        price_cents: 1499,
        stock: 10,
        category_id: None,
        tag_ids: Some(vec![organic.id]),
    };
    let created = products::create_product(&repo, form).expect("expected product creation");

    products::remove_product(&repo, created.id).expect("expected product removal");

    let result = products::get_product(&repo, created.id);
    assert!(matches!(result, Err(ServiceError::NotFound)));
    assert!(repo.list_product_tags(created.id).expect("list links").is_empty());
}
