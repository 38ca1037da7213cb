pub mod account;
pub mod collection;
pub mod index;
pub mod product;
pub mod system;
pub mod user;

use surrealdb::{
    engine::any::{connect, Any},
    opt::auth::Root,
    Surreal,
};
use validator::ValidationError;

use crate::setup::DatabaseConfig;

/// Names are spliced into statement text, so a rejected one never reaches
/// the engine; it surfaces as an API error like any other bad request.
pub(crate) fn invalid_request(error: ValidationError) -> surrealdb::Error {
    let message = error
        .message
        .map(|message| message.to_string())
        .unwrap_or_else(|| error.code.to_string());

    surrealdb::Error::Api(surrealdb::error::Api::InvalidRequest(message))
}

#[derive(Clone)]
pub struct DatabaseQuery<'a> {
    pub collection: collection::CollectionQuery<'a>,
    pub index: index::IndexQuery<'a>,
    pub account: account::AccountQuery<'a>,
    pub system: system::SystemQuery<'a>,
}

/// Owns the single engine connection and remembers which database the
/// provisioning targets, so handles that hop scopes can return to it.
#[derive(Clone)]
pub struct DatabaseLayer {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub db: Surreal<Any>,
}

impl DatabaseLayer {
    pub async fn new(config: &DatabaseConfig, database: String) -> Result<Self, surrealdb::Error> {
        let db = connect(config.url.as_str()).await?;
        tracing::info!(url = %config.url, "connected to database engine");

        if let Some((username, password)) = config.credentials() {
            db.signin(Root { username, password }).await?;
            tracing::debug!(username, "signed in with root credentials");
        }

        Self::from_client(db, config.url.clone(), config.namespace.clone(), database).await
    }

    pub async fn from_client(
        db: Surreal<Any>,
        url: String,
        namespace: String,
        database: String,
    ) -> Result<Self, surrealdb::Error> {
        let layer = Self {
            url,
            namespace,
            database,
            db,
        };

        layer.select_target().await?;

        Ok(layer)
    }

    /// Select (and implicitly create) the target namespace and database.
    pub async fn select_target(&self) -> Result<(), surrealdb::Error> {
        self.db
            .use_ns(self.namespace.clone())
            .use_db(self.database.clone())
            .await?;

        tracing::debug!(
            url = %self.url,
            namespace = %self.namespace,
            database = %self.database,
            "target selected"
        );

        Ok(())
    }

    pub fn query(&self) -> DatabaseQuery {
        DatabaseQuery {
            collection: collection::CollectionQuery::new(&self.db),
            index: index::IndexQuery::new(&self.db),
            account: account::AccountQuery::new(self),
            system: system::SystemQuery::new(self),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use surrealdb::opt::Config;

    use super::*;
    use crate::utils::seed;

    pub const ROOT_USER: &str = "root";
    pub const ROOT_PASS: &str = "root";

    /// Fresh embedded engine per call; nothing is shared between tests.
    pub async fn memory_layer() -> DatabaseLayer {
        let db = connect("mem://").await.unwrap();

        DatabaseLayer::from_client(
            db,
            String::from("mem://"),
            String::from("aprendizaje"),
            String::from(seed::DATABASE_NAME),
        )
        .await
        .unwrap()
    }

    /// Embedded engine that enforces authentication, signed in as root.
    pub async fn authenticated_memory_layer() -> DatabaseLayer {
        let config = Config::new().user(Root {
            username: ROOT_USER,
            password: ROOT_PASS,
        });
        let db = connect(("mem://", config)).await.unwrap();

        db.signin(Root {
            username: ROOT_USER,
            password: ROOT_PASS,
        })
        .await
        .unwrap();

        DatabaseLayer::from_client(
            db,
            String::from("mem://"),
            String::from("aprendizaje"),
            String::from(seed::DATABASE_NAME),
        )
        .await
        .unwrap()
    }
}
