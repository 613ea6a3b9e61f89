use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::handlers;

/// Route table; role gating happens in the `AdminUser`/`MemberUser`
/// extractors each handler takes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = json!({
            "status": false,
            "message": "Validation error",
            "errors": { "body": [err.to_string()] },
        });
        let response = HttpResponse::UnprocessableEntity().json(body);
        InternalError::from_response(err, response).into()
    }))
    .route("/register", web::post().to(handlers::auth::register))
    .route("/login", web::post().to(handlers::auth::login))
    .route("/user", web::get().to(handlers::auth::me))
    .service(
        web::scope("/hotels")
            .route("/search", web::get().to(handlers::bookings::search_hotels))
            .route("", web::get().to(handlers::hotels::list_hotels))
            .route("", web::post().to(handlers::hotels::create_hotel))
            .route("/update", web::post().to(handlers::hotels::update_hotel))
            .route("/{id}/edit", web::get().to(handlers::hotels::edit_hotel))
            .route("/{id}/delete", web::delete().to(handlers::hotels::delete_hotel)),
    )
    .service(
        web::scope("/rooms")
            .route("", web::get().to(handlers::rooms::list_rooms))
            .route("", web::post().to(handlers::rooms::create_room))
            .route("/update", web::post().to(handlers::rooms::update_room))
            .route("/{id}/edit", web::get().to(handlers::rooms::edit_room))
            .route("/{id}", web::delete().to(handlers::rooms::delete_room)),
    )
    .service(
        web::scope("/bookings")
            .route("", web::post().to(handlers::bookings::create_booking))
            .route("/history", web::get().to(handlers::bookings::booking_history))
            .route("/{id}/cancel", web::delete().to(handlers::bookings::cancel_booking)),
    );
}
