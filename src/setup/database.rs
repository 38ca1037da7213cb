use crate::{
    errors::ProvisionError, services::database::DatabaseLayer, setup::DatabaseConfig,
    utils::seed,
};

pub async fn setup_database(config: &DatabaseConfig) -> Result<DatabaseLayer, ProvisionError> {
    let layer = DatabaseLayer::new(config, String::from(seed::DATABASE_NAME)).await?;

    Ok(layer)
}
