use std::{collections::BTreeMap, fmt};

use validator::ValidationError;

use super::{invalid_request, system::DatabaseInfo, DatabaseLayer};
use crate::utils::validation::{validate_identifier, validate_secret};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Read,
    ReadWrite,
}

impl Role {
    fn as_engine_role(&self) -> &'static str {
        match self {
            Role::Read => "VIEWER",
            Role::ReadWrite => "EDITOR",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleGrant {
    pub role: Role,
    pub database: String,
}

impl RoleGrant {
    pub fn new(role: Role, database: &str) -> Self {
        RoleGrant {
            role,
            database: String::from(database),
        }
    }
}

#[derive(Clone)]
pub struct AccountDescriptor {
    pub username: String,
    password: String,
    pub grants: Vec<RoleGrant>,
}

impl AccountDescriptor {
    pub fn new(username: &str, password: &str, grants: Vec<RoleGrant>) -> Self {
        AccountDescriptor {
            username: String::from(username),
            password: String::from(password),
            grants,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifier(&self.username)?;
        validate_secret(&self.password)?;

        for grant in &self.grants {
            validate_identifier(&grant.database)?;
        }

        Ok(())
    }

    fn statement(&self, grant: &RoleGrant) -> String {
        format!(
            "DEFINE USER {} ON DATABASE PASSWORD '{}' ROLES {};",
            self.username,
            self.password,
            grant.role.as_engine_role()
        )
    }
}

impl fmt::Debug for AccountDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountDescriptor")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("grants", &self.grants)
            .finish()
    }
}

/// Accounts live in the database their grant is scoped to, so defining one
/// means hopping away from the target database and back again.
#[derive(Clone)]
pub struct AccountQuery<'a> {
    layer: &'a DatabaseLayer,
}

impl<'a> AccountQuery<'a> {
    pub(crate) fn new(layer: &'a DatabaseLayer) -> Self {
        Self { layer }
    }
}

impl<'a> AccountQuery<'a> {
    /// Fails when the username is already taken in any granted scope.
    pub async fn create(&self, account: &AccountDescriptor) -> Result<(), surrealdb::Error> {
        account.validate().map_err(invalid_request)?;

        let result = self.define_grants(account).await;
        self.layer.select_target().await?;

        result
    }

    async fn define_grants(&self, account: &AccountDescriptor) -> Result<(), surrealdb::Error> {
        for grant in &account.grants {
            self.layer
                .db
                .use_ns(self.layer.namespace.clone())
                .use_db(grant.database.clone())
                .await?;

            self.layer.db.query(account.statement(grant)).await?.check()?;

            tracing::debug!(
                username = %account.username,
                database = %grant.database,
                role = grant.role.as_engine_role(),
                "account granted"
            );
        }

        Ok(())
    }

    /// Account definitions (name to engine definition) held by `database`.
    pub async fn definitions(
        &self,
        database: &str,
    ) -> Result<BTreeMap<String, String>, surrealdb::Error> {
        validate_identifier(database).map_err(invalid_request)?;

        self.layer
            .db
            .use_ns(self.layer.namespace.clone())
            .use_db(String::from(database))
            .await?;

        let info = self.database_info().await;
        self.layer.select_target().await?;

        Ok(info?.users)
    }

    async fn database_info(&self) -> Result<DatabaseInfo, surrealdb::Error> {
        let mut response = self.layer.db.query("INFO FOR DB;").await?.check()?;
        let info: Option<DatabaseInfo> = response.take(0)?;

        Ok(info.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::database::testing::memory_layer, utils::seed};

    #[test]
    fn roles_map_to_engine_roles() {
        let account = AccountDescriptor::new(
            "reader",
            "secret_1",
            vec![RoleGrant::new(Role::Read, seed::DATABASE_NAME)],
        );

        assert_eq!(
            account.statement(&account.grants[0]),
            "DEFINE USER reader ON DATABASE PASSWORD 'secret_1' ROLES VIEWER;"
        );
        assert_eq!(Role::ReadWrite.as_engine_role(), "EDITOR");
    }

    #[test]
    fn debug_output_hides_the_password() {
        let account = AccountDescriptor::new(
            "reader",
            "secret_1",
            vec![RoleGrant::new(Role::Read, seed::DATABASE_NAME)],
        );

        let printed = format!("{account:?}");

        assert!(!printed.contains("secret_1"));
        assert!(printed.contains("reader"));
    }

    #[tokio::test]
    async fn grants_land_in_each_scope_and_target_is_restored() {
        let layer = memory_layer().await;
        let query = layer.query();

        let account = AccountDescriptor::new(
            "app",
            "app_pass",
            vec![
                RoleGrant::new(Role::ReadWrite, seed::DATABASE_NAME),
                RoleGrant::new(Role::Read, "admin"),
            ],
        );
        query.account.create(&account).await.unwrap();

        let target = query.account.definitions(seed::DATABASE_NAME).await.unwrap();
        assert!(target["app"].contains("EDITOR"));

        let admin = query.account.definitions("admin").await.unwrap();
        assert!(admin["app"].contains("VIEWER"));

        // Later statements still run against the target database
        query.collection.create("after_accounts").await.unwrap();
        let tables = query.system.list_collections().await.unwrap();
        assert_eq!(tables, vec![(String::from("after_accounts"), 0)]);
    }

    #[tokio::test]
    async fn duplicate_username_fails() {
        let layer = memory_layer().await;
        let query = layer.query();

        let account = AccountDescriptor::new(
            "reader",
            "secret_1",
            vec![RoleGrant::new(Role::Read, seed::DATABASE_NAME)],
        );
        query.account.create(&account).await.unwrap();

        assert!(query.account.create(&account).await.is_err());
    }

    #[tokio::test]
    async fn quotes_in_passwords_are_refused() {
        let layer = memory_layer().await;

        let account = AccountDescriptor::new(
            "reader",
            "x' ROLES OWNER; --",
            vec![RoleGrant::new(Role::Read, seed::DATABASE_NAME)],
        );

        assert!(layer.query().account.create(&account).await.is_err());
    }
}
