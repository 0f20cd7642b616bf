//! Account storage in the document store.
//!
//! Each account is one document in the configured collection, with the
//! username as `_id`, so uniqueness is enforced by the store itself.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, Collection, Database};
use thiserror::Error;
use tracing::info;

use crate::config::UserStoreConfig;
use crate::database::models::UserAccount;

const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, UserStoreError>;

    async fn insert(&self, account: UserAccount) -> Result<(), UserStoreError>;

    async fn ping(&self) -> Result<(), UserStoreError>;
}

pub struct MongoUserStore {
    database: Database,
    collection: Collection<UserAccount>,
}

impl MongoUserStore {
    pub async fn connect(config: &UserStoreConfig) -> Result<Self, UserStoreError> {
        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let database = client.database(&config.database);
        let collection = database.collection::<UserAccount>(&config.collection);
        info!("Connected user store: {}.{}", config.database, config.collection);
        Ok(Self { database, collection })
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, UserStoreError> {
        let account = self.collection.find_one(doc! { "_id": username }).await?;
        Ok(account)
    }

    async fn insert(&self, account: UserAccount) -> Result<(), UserStoreError> {
        let username = account.username.clone();
        match self.collection.insert_one(account).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(UserStoreError::AlreadyExists(username)),
            Err(e) => Err(e.into()),
        }
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}
