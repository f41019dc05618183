use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::tags::{AddTagForm, EditTagForm};
use crate::repository::DieselRepository;
use crate::routes::{not_found, server_error};
use crate::services::ServiceError;
use crate::services::tags::{create_tag, get_tag, list_tags, modify_tag, remove_tag};

#[get("/tags")]
pub async fn show_tags(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_tags(repo.get_ref()) {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(err) => {
            log::error!("Failed to list tags: {err}");
            server_error()
        }
    }
}

#[get("/tags/{tag_id}")]
pub async fn show_tag(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let tag_id = path.into_inner();

    match get_tag(repo.get_ref(), tag_id) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(ServiceError::NotFound) => not_found("Tag not found"),
        Err(err) => {
            log::error!("Failed to fetch tag {tag_id}: {err}");
            server_error()
        }
    }
}

// Unlike the category and product writers, tag write failures have always
// surfaced as 500 rather than 400. Kept for compatibility.
#[post("/tags")]
pub async fn add_tag(
    repo: web::Data<DieselRepository>,
    payload: web::Json<AddTagForm>,
) -> impl Responder {
    match create_tag(repo.get_ref(), payload.into_inner()) {
        Ok(tag) => HttpResponse::Created().json(tag),
        Err(err) => {
            log::error!("Failed to create tag: {err}");
            server_error()
        }
    }
}

#[put("/tags/{tag_id}")]
pub async fn edit_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    payload: web::Json<EditTagForm>,
) -> impl Responder {
    let tag_id = path.into_inner();

    match modify_tag(repo.get_ref(), tag_id, payload.into_inner()) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(ServiceError::NotFound) => not_found("Tag not found"),
        Err(err) => {
            log::error!("Failed to update tag {tag_id}: {err}");
            server_error()
        }
    }
}

#[delete("/tags/{tag_id}")]
pub async fn delete_tag(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let tag_id = path.into_inner();

    match remove_tag(repo.get_ref(), tag_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => not_found("Tag not found"),
        Err(err) => {
            log::error!("Failed to delete tag {tag_id}: {err}");
            server_error()
        }
    }
}
