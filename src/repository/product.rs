use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::category::Category as DomainCategory;
use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::domain::product_tag::{
    NewProductTag as DomainNewProductTag, ProductTag as DomainProductTag, TagSyncPlan, plan_sync,
};
use crate::domain::tag::Tag as DomainTag;
use crate::models::category::Category as DbCategory;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::models::product_tag::{NewProductTag as DbNewProductTag, ProductTag as DbProductTag};
use crate::models::tag::Tag as DbTag;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match product {
            Some(db_product) => {
                let mut attached = attach_relations(&mut conn, vec![db_product])?;
                Ok(attached.pop())
            }
            None => Ok(None),
        }
    }

    fn list_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_products = products::table
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok(Vec::new());
        }

        attach_relations(&mut conn, db_products)
    }

    fn list_product_tags(&self, product_id: i32) -> RepositoryResult<Vec<DomainProductTag>> {
        use crate::schema::product_tags;

        let mut conn = self.conn()?;
        let rows = product_tags::table
            .filter(product_tags::product_id.eq(product_id))
            .order(product_tags::id.asc())
            .load::<DbProductTag>(&mut conn)?;

        Ok(rows.into_iter().map(DomainProductTag::from).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let insertable = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&insertable)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let target = products::table.filter(products::id.eq(product_id));
        let affected = diesel::update(target).set(&db_updates).execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let affected = diesel::delete(products::table.filter(products::id.eq(product_id)))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn create_product_tags(&self, links: &[DomainNewProductTag]) -> RepositoryResult<usize> {
        use crate::schema::product_tags;

        if links.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let rows: Vec<DbNewProductTag> = links.iter().map(DbNewProductTag::from).collect();

        let inserted = diesel::insert_into(product_tags::table)
            .values(&rows)
            .execute(&mut conn)?;

        Ok(inserted)
    }

    fn sync_product_tags(&self, product_id: i32, tag_ids: &[i32]) -> RepositoryResult<TagSyncPlan> {
        use crate::schema::product_tags;

        let mut conn = self.conn()?;

        conn.transaction::<TagSyncPlan, RepositoryError, _>(|conn| {
            let existing: Vec<DomainProductTag> = product_tags::table
                .filter(product_tags::product_id.eq(product_id))
                .order(product_tags::id.asc())
                .load::<DbProductTag>(conn)?
                .into_iter()
                .map(DomainProductTag::from)
                .collect();

            let plan = plan_sync(&existing, tag_ids);

            if !plan.link_ids_to_remove.is_empty() {
                diesel::delete(
                    product_tags::table.filter(product_tags::id.eq_any(&plan.link_ids_to_remove)),
                )
                .execute(conn)?;
            }

            if !plan.tag_ids_to_add.is_empty() {
                let rows: Vec<DbNewProductTag> = plan
                    .tag_ids_to_add
                    .iter()
                    .map(|tag_id| DbNewProductTag {
                        product_id,
                        tag_id: *tag_id,
                    })
                    .collect();

                diesel::insert_into(product_tags::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            Ok(plan)
        })
    }
}

fn attach_relations(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<DomainProduct>> {
    let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
    let category_ids: Vec<i32> = db_products
        .iter()
        .filter_map(|product| product.category_id)
        .collect();

    let categories = load_categories_by_id(conn, &category_ids)?;
    let mut tag_map = load_tags_for_products(conn, &product_ids)?;

    let mut domain_products = Vec::with_capacity(db_products.len());
    for db_product in db_products {
        let mut domain: DomainProduct = db_product.into();
        domain.category = domain
            .category_id
            .and_then(|category_id| categories.get(&category_id).cloned());
        domain.tags = tag_map.remove(&domain.id).unwrap_or_default();
        domain_products.push(domain);
    }

    Ok(domain_products)
}

fn load_categories_by_id(
    conn: &mut SqliteConnection,
    category_ids: &[i32],
) -> RepositoryResult<HashMap<i32, DomainCategory>> {
    use crate::schema::categories;

    if category_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = categories::table
        .filter(categories::id.eq_any(category_ids))
        .load::<DbCategory>(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| (row.id, DomainCategory::from(row)))
        .collect())
}

fn load_tags_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainTag>>> {
    use crate::schema::{product_tags, tags};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_tags::table
        .inner_join(tags::table)
        .filter(product_tags::product_id.eq_any(product_ids))
        .order((product_tags::product_id.asc(), product_tags::id.asc()))
        .select((product_tags::product_id, DbTag::as_select()))
        .load::<(i32, DbTag)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (product_id, tag) in rows {
        map.entry(product_id).or_default().push(tag.into());
    }

    Ok(map)
}
