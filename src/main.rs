use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use loc8r_api::{
    config::AppConfig,
    db::{location_store::MongoLocationStore, mongo},
    routes,
    services::location_service::LocationService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let client = mongo::create_mongo_client(&config.mongo.uri)
        .await
        .map_err(std::io::Error::other)?;
    let collection = mongo::locations_collection(&client, &config.mongo)
        .await
        .map_err(std::io::Error::other)?;

    let service = web::Data::new(LocationService::new(Arc::new(MongoLocationStore::new(
        collection,
    ))));

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);

    // Stops gracefully on SIGINT/SIGTERM.
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(service.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    mongo::disconnect(client, "app termination").await;
    Ok(())
}
