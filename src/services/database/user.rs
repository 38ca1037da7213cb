use chrono::Utc;
use serde::Serialize;
use surrealdb::sql::Datetime;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Address {
    #[serde(rename = "calle")]
    pub street: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "pais")]
    pub country: String,
}

/// A learner-facing user document. The record id is left to the engine.
///
/// Stored keys are the guide's own (`nombre`, `direccion.ciudad`, ...) so
/// the printed example queries work against what was inserted.
#[derive(Serialize, Debug, Clone)]
pub struct User {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "edad")]
    pub age: u32,
    #[serde(rename = "direccion")]
    pub address: Address,
    #[serde(rename = "intereses")]
    pub interests: Vec<String>,
    #[serde(rename = "activo")]
    pub active: bool,

    #[serde(rename = "fecha_registro")]
    pub registered_at: Datetime,
    #[serde(rename = "ultimo_acceso")]
    pub last_access: Datetime,
}

impl User {
    pub fn new(
        name: &str,
        email: &str,
        age: u32,
        address: Address,
        interests: &[&str],
        active: bool,
    ) -> Self {
        let now = Datetime::from(Utc::now());

        User {
            name: String::from(name),
            email: String::from(email),
            age,
            address,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            active,
            registered_at: now.clone(),
            last_access: now,
        }
    }
}
