//! Runs against a live MongoDB. `cargo test -- --ignored` with `MONGODB_URI`
//! pointing at a disposable database.

mod common;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::Value;
use serial_test::serial;
use std::sync::Arc;

use loc8r_api::config::MongoConfig;
use loc8r_api::db::{location_store::MongoLocationStore, mongo};
use loc8r_api::models::location::Location;
use loc8r_api::routes;
use loc8r_api::services::location_service::LocationService;

use common::starcups_form;

async fn mongo_collection() -> (mongodb::Client, mongodb::Collection<Location>) {
    let uri = std::env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let config = MongoConfig {
        uri,
        database: "Loc8rTest".to_string(),
        collection: "locations".to_string(),
    };

    let client = mongo::create_mongo_client(&config.uri).await.unwrap();
    let collection = mongo::locations_collection(&client, &config).await.unwrap();
    collection.delete_many(bson::doc! {}).await.unwrap();
    (client, collection)
}

#[actix_rt::test]
#[serial]
#[ignore]
async fn test_full_location_lifecycle_against_mongo() {
    let (client, collection) = mongo_collection().await;
    let service = LocationService::new(Arc::new(MongoLocationStore::new(collection)));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(service))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/locations")
        .set_form(starcups_form())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["_id"].as_str().unwrap().to_string();
    println!("✓ Create passed");

    let req = test::TestRequest::get()
        .uri("/api/locations?lng=-0.9690884&lat=51.455&maxDistance=5")
        .to_request();
    let ranked: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ranked[0]["_id"], id.as_str());
    let distance = ranked[0]["distance"].as_f64().unwrap();
    assert!(distance < 0.01, "got {}", distance);
    println!("✓ List by distance passed");

    let mut update = starcups_form();
    update["name"] = Value::from("Starcups Reading");
    let req = test::TestRequest::put()
        .uri(&format!("/api/locations/{}", id))
        .set_form(update)
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Starcups Reading");
    assert!(updated.get("rating").is_none());
    println!("✓ Update passed");

    let req = test::TestRequest::get()
        .uri(&format!("/api/locations/{}", id))
        .to_request();
    let read: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(read["rating"], 0.0);
    assert_eq!(read["name"], "Starcups Reading");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/locations/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/locations/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    println!("✓ Delete passed");

    mongo::disconnect(client, "test teardown").await;
}
