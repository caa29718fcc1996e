use actix_web::{error, web, HttpResponse};

use crate::error::LocationError;

pub mod location;

/// Mounts `/health` and the location API under `/api`.
///
/// The bare `/locations/` paths carry no id and answer with the missing-id
/// errors of the corresponding operation.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        invalid_payload(err.to_string())
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _| {
        invalid_payload(err.to_string())
    }))
    .route("/health", web::get().to(health))
    .service(
        web::scope("/api")
            .service(
                web::resource("/locations")
                    .route(web::get().to(location::list_by_distance))
                    .route(web::post().to(location::create)),
            )
            .service(
                web::resource(["/locations/{locationid}", "/locations/"])
                    .route(web::get().to(location::read_one))
                    .route(web::put().to(location::update_one))
                    .route(web::delete().to(location::delete_one)),
            ),
    );
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

fn invalid_payload(message: String) -> error::Error {
    LocationError::InvalidPayload(message).into()
}
