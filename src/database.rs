use wither::mongodb::{self, Database};

use crate::errors::Error;

/// Opens the MongoDB client once at startup. The returned handle is cloned
/// into every store that needs it.
pub async fn connect(db_uri: &str, db_name: &str) -> Result<Database, Error> {
    let client = mongodb::Client::with_uri_str(db_uri).await?;
    tracing::info!("Connected to MongoDB database {}", db_name);

    Ok(client.database(db_name))
}
