use async_trait::async_trait;
use futures::stream::TryStreamExt;
use validator::Validate;
use wither::Model as WitherModel;
use wither::bson::Document;
use wither::bson::doc;
use wither::bson::oid::ObjectId;
use wither::mongodb::Database;
use wither::mongodb::options::FindOneAndUpdateOptions;
use wither::mongodb::options::FindOneOptions;
use wither::mongodb::options::FindOptions;
use wither::mongodb::options::ReturnDocument;
use wither::mongodb::results::DeleteResult;
use wither::mongodb::results::UpdateResult;

use crate::errors::Error;

// All models that have a MongoDB collection implement this and inherit
// these methods. The database handle is always passed in by the caller.
#[async_trait]
pub trait ModelExt
where
    Self: WitherModel + Validate,
{
    async fn create(db: &Database, mut model: Self) -> Result<Self, Error> {
        model.validate()?;
        model.save(db, None).await.map_err(Error::Wither)?;

        Ok(model)
    }

    async fn find_by_id(db: &Database, id: &ObjectId) -> Result<Option<Self>, Error> {
        <Self as WitherModel>::find_one(db, doc! { "_id": id }, None)
            .await
            .map_err(Error::Wither)
    }

    async fn find_one<O>(db: &Database, query: Document, options: O) -> Result<Option<Self>, Error>
    where
        O: Into<Option<FindOneOptions>> + Send,
    {
        <Self as WitherModel>::find_one(db, query, options)
            .await
            .map_err(Error::Wither)
    }

    async fn find<O>(db: &Database, query: Document, options: O) -> Result<Vec<Self>, Error>
    where
        O: Into<Option<FindOptions>> + Send,
    {
        <Self as WitherModel>::find(db, query, options)
            .await
            .map_err(Error::Wither)?
            .try_collect::<Vec<Self>>()
            .await
            .map_err(Error::Wither)
    }

    async fn find_one_and_update(
        db: &Database,
        query: Document,
        update: Document,
        upsert: bool,
    ) -> Result<Option<Self>, Error> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(upsert)
            .return_document(ReturnDocument::After)
            .build();

        <Self as WitherModel>::find_one_and_update(db, query, update, options)
            .await
            .map_err(Error::Wither)
    }

    async fn update_one(
        db: &Database,
        query: Document,
        update: Document,
    ) -> Result<UpdateResult, Error> {
        Self::collection(db)
            .update_one(query, update)
            .await
            .map_err(Error::Mongo)
    }

    async fn delete_one(db: &Database, query: Document) -> Result<DeleteResult, Error> {
        Self::collection(db)
            .delete_one(query)
            .await
            .map_err(Error::Mongo)
    }

    async fn exists(db: &Database, query: Document) -> Result<bool, Error> {
        let count = Self::collection(db)
            .count_documents(query)
            .await
            .map_err(Error::Mongo)?;

        Ok(count > 0)
    }
}

/// Parses a hex object id coming from a path or a stored reference.
pub fn parse_object_id(id: &str) -> Result<ObjectId, Error> {
    ObjectId::parse_str(id).map_err(|_| Error::ParseObjectID(id.to_string()))
}
