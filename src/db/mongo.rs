use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection, IndexModel,
};
use std::time::Duration;

use crate::config::MongoConfig;
use crate::models::location::Location;

pub async fn create_mongo_client(uri: &str) -> mongodb::error::Result<Client> {
    log::info!("Connecting to MongoDB: {}", uri);

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    // Stable API, MongoDB 5.0+
    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    match client.database("admin").run_command(doc! {"ping": 1}).await {
        Ok(_) => log::info!("MongoDB connected to {}", uri),
        Err(e) => {
            log::warn!("MongoDB connection error: {}", e);
            log::warn!("Continuing without a verified connection; requests may fail");
        }
    }

    Ok(client)
}

/// The locations collection, with the `2dsphere` index geo-near queries need.
pub async fn locations_collection(
    client: &Client,
    config: &MongoConfig,
) -> mongodb::error::Result<Collection<Location>> {
    let collection = client
        .database(&config.database)
        .collection::<Location>(&config.collection);

    let index = IndexModel::builder()
        .keys(doc! { "coords": "2dsphere" })
        .build();
    collection.create_index(index).await?;

    Ok(collection)
}

/// Closes the client once the server has stopped taking requests.
pub async fn disconnect(client: Client, reason: &str) {
    client.shutdown().await;
    log::info!("MongoDB disconnected through {}", reason);
}
