use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{bad_request, not_found, server_error};
use crate::services::ServiceError;
use crate::services::categories::{
    create_category, get_category, list_categories, modify_category, remove_category,
};

#[get("/categories")]
pub async fn show_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            server_error()
        }
    }
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match get_category(repo.get_ref(), category_id) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(ServiceError::NotFound) => not_found("Category not found"),
        Err(err) => {
            log::error!("Failed to fetch category {category_id}: {err}");
            server_error()
        }
    }
}

#[post("/categories")]
pub async fn add_category(
    repo: web::Data<DieselRepository>,
    payload: web::Json<AddCategoryForm>,
) -> impl Responder {
    match create_category(repo.get_ref(), payload.into_inner()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => {
            log::error!("Failed to create category: {err}");
            bad_request()
        }
    }
}

#[put("/categories/{category_id}")]
pub async fn edit_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    payload: web::Json<EditCategoryForm>,
) -> impl Responder {
    let category_id = path.into_inner();

    match modify_category(repo.get_ref(), category_id, payload.into_inner()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(ServiceError::NotFound) => not_found("Category not found"),
        Err(err) => {
            log::error!("Failed to update category {category_id}: {err}");
            bad_request()
        }
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match remove_category(repo.get_ref(), category_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => not_found("Category not found"),
        Err(err) => {
            log::error!("Failed to delete category {category_id}: {err}");
            server_error()
        }
    }
}
