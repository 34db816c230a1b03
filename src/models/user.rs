use serde::{Deserialize, Serialize};
use validator::Validate;
use wither::Model as WitherModel;
use wither::bson::oid::ObjectId;

use crate::utils::models::ModelExt;

impl ModelExt for User {}

#[derive(Debug, Clone, Default, Serialize, Deserialize, WitherModel, Validate)]
#[model(collection_name = "users")]
#[serde(default)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub full_name: String,
    pub email: String,
}

impl User {
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}
