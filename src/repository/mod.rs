use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::product_tag::{NewProductTag, ProductTag, TagSyncPlan};
use crate::domain::tag::{NewTag, Tag, UpdateTag};

pub mod errors;

pub mod category;
pub mod product;
pub mod tag;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read operations over category records.
///
/// Categories returned by these methods carry their products, loaded eagerly.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

/// Read operations over product records.
///
/// Products returned by `get_product_by_id` and `list_products` carry their
/// category and tags, loaded eagerly.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    fn list_product_tags(&self, product_id: i32) -> RepositoryResult<Vec<ProductTag>>;
}

/// Write operations over product records and their tag associations.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    /// Applies `updates` to the product row matching `product_id` and returns
    /// the number of rows affected. Matching no row is not an error.
    fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<usize>;
    /// Deletes the product row matching `product_id` and returns the number of
    /// rows affected. Matching no row is not an error.
    fn delete_product(&self, product_id: i32) -> RepositoryResult<usize>;
    fn create_product_tags(&self, links: &[NewProductTag]) -> RepositoryResult<usize>;
    /// Reconciles the stored tag associations of a product against
    /// `tag_ids`, deleting and inserting rows inside a single transaction.
    fn sync_product_tags(&self, product_id: i32, tag_ids: &[i32]) -> RepositoryResult<TagSyncPlan>;
}

/// Read operations over tag records.
///
/// Tags returned by these methods carry their products, loaded eagerly.
pub trait TagReader {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
    fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
}

/// Write operations over tag records.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn update_tag(&self, tag_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
}
