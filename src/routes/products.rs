use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::routes::{bad_request, message, not_found, server_error};
use crate::services::ServiceError;
use crate::services::products::{
    create_product, get_product, list_products, modify_product, remove_product,
};

#[get("/products")]
pub async fn show_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_products(repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => {
            log::error!("Failed to list products: {err}");
            server_error()
        }
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match get_product(repo.get_ref(), product_id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(ServiceError::NotFound) => not_found("Product not found"),
        Err(err) => {
            log::error!("Failed to fetch product {product_id}: {err}");
            server_error()
        }
    }
}

#[post("/products")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    payload: web::Json<AddProductForm>,
) -> impl Responder {
    match create_product(repo.get_ref(), payload.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => {
            log::error!("Failed to create product: {err}");
            bad_request()
        }
    }
}

#[put("/products/{product_id}")]
pub async fn edit_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    payload: web::Json<EditProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match modify_product(repo.get_ref(), product_id, payload.into_inner()) {
        Ok(()) => message("Product updated successfully"),
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            bad_request()
        }
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match remove_product(repo.get_ref(), product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            server_error()
        }
    }
}
