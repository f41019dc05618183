use actix_web::HttpResponse;
use serde::Serialize;

pub mod categories;
pub mod products;
pub mod tags;

#[derive(Serialize)]
struct JsonMessage<'a> {
    message: &'a str,
}

pub(crate) fn message(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(JsonMessage { message })
}

pub(crate) fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(JsonMessage { message })
}

pub(crate) fn bad_request() -> HttpResponse {
    HttpResponse::BadRequest().json(JsonMessage {
        message: "Bad Request",
    })
}

pub(crate) fn server_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(JsonMessage {
        message: "Server Error",
    })
}
