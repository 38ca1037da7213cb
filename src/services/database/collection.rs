use serde::{Deserialize, Serialize};
use surrealdb::{engine::any::Any, sql::Thing, Surreal};

use super::invalid_request;
use crate::utils::validation::validate_identifier;

#[derive(Deserialize, Debug)]
struct Inserted {
    #[allow(dead_code)]
    id: Thing,
}

#[derive(Deserialize, Debug)]
struct Count {
    count: usize,
}

#[derive(Clone)]
pub struct CollectionQuery<'a> {
    db: &'a Surreal<Any>,
}

impl<'a> CollectionQuery<'a> {
    pub(crate) fn new(db: &'a Surreal<Any>) -> Self {
        Self { db }
    }
}

impl<'a> CollectionQuery<'a> {
    /// Fails when the collection already exists.
    pub async fn create(&self, name: &str) -> Result<(), surrealdb::Error> {
        validate_identifier(name).map_err(invalid_request)?;

        let query = format!("DEFINE TABLE {name} SCHEMALESS;");
        self.db.query(query).await?.check()?;

        tracing::debug!(collection = name, "collection defined");

        Ok(())
    }

    /// Inserts the whole batch with a single statement and returns how many
    /// records the engine created. Identifiers are assigned by the engine.
    pub async fn insert_many<T>(
        &self,
        name: &str,
        documents: Vec<T>,
    ) -> Result<usize, surrealdb::Error>
    where
        T: Serialize + 'static,
    {
        validate_identifier(name).map_err(invalid_request)?;

        let inserted: Vec<Inserted> = self.db.insert(name).content(documents).await?;

        tracing::debug!(
            collection = name,
            inserted = inserted.len(),
            "documents inserted"
        );

        Ok(inserted.len())
    }

    /// Number of records matching `filter` (a SurrealQL condition) right now,
    /// or every record when no filter is given.
    pub async fn count(
        &self,
        name: &str,
        filter: Option<&str>,
    ) -> Result<usize, surrealdb::Error> {
        validate_identifier(name).map_err(invalid_request)?;

        let condition = match filter {
            Some(filter) => format!(" WHERE {filter}"),
            None => String::new(),
        };
        let query = format!("SELECT count() FROM {name}{condition} GROUP ALL;");

        let mut response = self.db.query(query).await?.check()?;
        let count: Option<Count> = response.take(0)?;

        // An empty table yields no group at all
        Ok(count.map(|c| c.count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::services::database::testing::memory_layer;

    #[tokio::test]
    async fn counts_whole_collection_and_filtered() {
        let layer = memory_layer().await;
        let collection = layer.query().collection;

        collection.create("things").await.unwrap();
        assert_eq!(collection.count("things", None).await.unwrap(), 0);

        let inserted = collection
            .insert_many(
                "things",
                vec![
                    json!({ "label": "a", "weight": 5 }),
                    json!({ "label": "b", "weight": 50 }),
                    json!({ "label": "c", "weight": 500 }),
                ],
            )
            .await
            .unwrap();

        assert_eq!(inserted, 3);
        assert_eq!(collection.count("things", None).await.unwrap(), 3);
        assert_eq!(
            collection.count("things", Some("weight > 10")).await.unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn defining_an_existing_collection_fails() {
        let layer = memory_layer().await;
        let collection = layer.query().collection;

        collection.create("things").await.unwrap();

        assert!(collection.create("things").await.is_err());
    }

    #[tokio::test]
    async fn rejects_names_that_are_not_identifiers() {
        let layer = memory_layer().await;
        let collection = layer.query().collection;

        assert!(collection.create("things; REMOVE NAMESPACE x").await.is_err());
        assert!(collection.count("bad name", None).await.is_err());
    }
}
