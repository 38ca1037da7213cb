use std::collections::BTreeMap;

use serde::Deserialize;

use super::DatabaseLayer;

#[derive(Deserialize, Debug, Default)]
struct RootInfo {
    #[serde(default)]
    namespaces: BTreeMap<String, String>,
}

#[derive(Deserialize, Debug, Default)]
struct NamespaceInfo {
    #[serde(default)]
    databases: BTreeMap<String, String>,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct DatabaseInfo {
    #[serde(default)]
    pub tables: BTreeMap<String, String>,
    #[serde(default)]
    pub users: BTreeMap<String, String>,
}

#[derive(Deserialize, Debug)]
struct Count {
    count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSummary {
    pub namespace: String,
    pub name: String,
    pub collections: usize,
    pub documents: usize,
}

#[derive(Clone)]
pub struct SystemQuery<'a> {
    layer: &'a DatabaseLayer,
}

impl<'a> SystemQuery<'a> {
    pub(crate) fn new(layer: &'a DatabaseLayer) -> Self {
        Self { layer }
    }
}

impl<'a> SystemQuery<'a> {
    /// Every database of every namespace on the instance. The engine keeps
    /// no per-database storage figure, so the footprint is reported as the
    /// number of collections and documents each one holds.
    pub async fn list_databases(&self) -> Result<Vec<DatabaseSummary>, surrealdb::Error> {
        let result = self.walk_databases().await;
        self.layer.select_target().await?;

        result
    }

    async fn walk_databases(&self) -> Result<Vec<DatabaseSummary>, surrealdb::Error> {
        let db = &self.layer.db;

        let mut response = db.query("INFO FOR ROOT;").await?.check()?;
        let root: Option<RootInfo> = response.take(0)?;

        let mut summaries = Vec::new();
        for namespace in root.unwrap_or_default().namespaces.into_keys() {
            db.use_ns(namespace.clone()).await?;

            let mut response = db.query("INFO FOR NS;").await?.check()?;
            let info: Option<NamespaceInfo> = response.take(0)?;

            for database in info.unwrap_or_default().databases.into_keys() {
                db.use_ns(namespace.clone()).use_db(database.clone()).await?;

                let tables = self.count_tables().await?;

                summaries.push(DatabaseSummary {
                    namespace: namespace.clone(),
                    name: database,
                    collections: tables.len(),
                    documents: tables.iter().map(|(_, count)| count).sum(),
                });
            }
        }

        Ok(summaries)
    }

    /// Collections of the target database with their document counts.
    pub async fn list_collections(&self) -> Result<Vec<(String, usize)>, surrealdb::Error> {
        self.layer.select_target().await?;

        self.count_tables().await
    }

    // Runs against whatever database the session currently has selected
    async fn count_tables(&self) -> Result<Vec<(String, usize)>, surrealdb::Error> {
        let db = &self.layer.db;

        let mut response = db.query("INFO FOR DB;").await?.check()?;
        let info: Option<DatabaseInfo> = response.take(0)?;

        let mut tables = Vec::new();
        for table in info.unwrap_or_default().tables.into_keys() {
            let mut response = db
                .query("SELECT count() FROM type::table($table) GROUP ALL;")
                .bind(("table", table.clone()))
                .await?
                .check()?;
            let count: Option<Count> = response.take(0)?;

            tables.push((table, count.map(|c| c.count).unwrap_or(0)));
        }

        Ok(tables)
    }
}
