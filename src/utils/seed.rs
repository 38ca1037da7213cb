use serde_json::json;

use crate::services::database::{
    account::{AccountDescriptor, Role, RoleGrant},
    index::{IndexDescriptor, IndexKind},
    product::Product,
    user::{Address, User},
};

pub const DATABASE_NAME: &str = "aprendizaje_mongodb";
pub const ADMIN_DATABASE_NAME: &str = "admin";

pub const USERS_COLLECTION: &str = "usuarios";
pub const PRODUCTS_COLLECTION: &str = "productos";

pub const ACTIVE_USERS_FILTER: &str = "activo = true";
pub const EXPENSIVE_PRODUCTS_FILTER: &str = "precio > 10000";

pub const READ_ONLY_USERNAME: &str = "usuario_consulta";
pub const APPLICATION_USERNAME: &str = "aplicacion_web";

pub const COMPLETION_MESSAGE: &str = "Guía de MongoDB ejecutada exitosamente";

pub fn users() -> Vec<User> {
    vec![
        User::new(
            "Ana García",
            "ana@ejemplo.com",
            28,
            Address {
                street: String::from("Av. Principal 123"),
                city: String::from("Ciudad de México"),
                country: String::from("México"),
            },
            &["programación", "música", "viajes"],
            true,
        ),
        User::new(
            "Carlos López",
            "carlos@ejemplo.com",
            35,
            Address {
                street: String::from("Calle Secundaria 456"),
                city: String::from("Guadalajara"),
                country: String::from("México"),
            },
            &["deportes", "tecnología"],
            true,
        ),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product::new(
            "Laptop Gamer",
            25000.00,
            "Tecnología",
            json!({
                "procesador": "Intel i7",
                "ram": "16GB",
                "almacenamiento": "1TB SSD"
            }),
            15,
            true,
            &["gaming", "tecnología", "portátil"],
        ),
        Product::new(
            "Smartphone",
            12000.00,
            "Tecnología",
            json!({
                "pantalla": "6.5 pulgadas",
                "almacenamiento": "128GB",
                "camara": "48MP"
            }),
            30,
            false,
            &["móvil", "smartphone", "tecnología"],
        ),
    ]
}

pub fn indexes() -> Vec<IndexDescriptor> {
    vec![
        IndexDescriptor::new(
            USERS_COLLECTION,
            "idx_email_unico",
            &["email"],
            IndexKind::Unique,
        ),
        IndexDescriptor::new(
            USERS_COLLECTION,
            "idx_ubicacion",
            &["direccion.ciudad", "direccion.pais"],
            IndexKind::Ascending,
        ),
        IndexDescriptor::new(
            PRODUCTS_COLLECTION,
            "idx_busqueda_texto",
            &["nombre"],
            IndexKind::Text {
                language: String::from("spanish"),
            },
        ),
    ]
}

pub fn accounts() -> Vec<AccountDescriptor> {
    vec![
        AccountDescriptor::new(
            READ_ONLY_USERNAME,
            "consulta123",
            vec![RoleGrant::new(Role::Read, DATABASE_NAME)],
        ),
        AccountDescriptor::new(
            APPLICATION_USERNAME,
            "app_segura_123",
            vec![
                RoleGrant::new(Role::ReadWrite, DATABASE_NAME),
                RoleGrant::new(Role::Read, ADMIN_DATABASE_NAME),
            ],
        ),
    ]
}

// Printed at the end so learners have somewhere to go next
pub const NEXT_QUERIES: [&str; 3] = [
    "SELECT * FROM usuarios;",
    "SELECT * FROM productos WHERE precio > 10000;",
    "SELECT direccion.ciudad AS ciudad, count() AS total FROM usuarios GROUP BY ciudad;",
];
