use actix_web::HttpResponse;
use glimpse_shared::dto::MessageResponse;

/// GET /
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Hello World!".to_string(),
    })
}
