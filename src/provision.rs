use std::io::Write;

use crate::{
    errors::ProvisionError,
    services::database::{
        account::Role, index::IndexKind, system::DatabaseSummary, DatabaseLayer,
    },
    utils::seed,
};

/// What a completed run left behind, as observed by its own queries.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub users_inserted: usize,
    pub products_inserted: usize,
    pub total_users: usize,
    pub active_users: usize,
    pub expensive_products: usize,
    pub databases: Vec<DatabaseSummary>,
    pub collections: Vec<(String, usize)>,
    pub message: &'static str,
}

/// Runs the guide top to bottom against one connection. Nothing is retried
/// or rolled back: the first failing step aborts the run and whatever was
/// already created stays in place.
pub struct Provisioner<'a, W: Write> {
    layer: &'a DatabaseLayer,
    out: W,
}

impl<'a, W: Write> Provisioner<'a, W> {
    pub fn new(layer: &'a DatabaseLayer, out: W) -> Self {
        Self { layer, out }
    }

    pub async fn run(&mut self) -> Result<ProvisionReport, ProvisionError> {
        self.select_database().await?;
        self.create_collections().await?;
        let (users_inserted, products_inserted) = self.insert_documents().await?;
        self.create_indexes().await?;
        let (total_users, active_users, expensive_products) = self.run_queries().await?;
        self.create_accounts().await?;
        let (databases, collections) = self.describe_system().await?;
        self.finish()?;

        Ok(ProvisionReport {
            users_inserted,
            products_inserted,
            total_users,
            active_users,
            expensive_products,
            databases,
            collections,
            message: seed::COMPLETION_MESSAGE,
        })
    }

    fn section(&mut self, title: &str) -> Result<(), ProvisionError> {
        writeln!(self.out, "\n=== {title} ===")?;
        tracing::info!(step = title, "starting step");

        Ok(())
    }

    async fn select_database(&mut self) -> Result<(), ProvisionError> {
        self.section("1. Conectando a MongoDB y seleccionando base de datos")?;

        self.layer.select_target().await?;
        writeln!(
            self.out,
            "✅ Base de datos '{}' seleccionada",
            self.layer.database
        )?;

        Ok(())
    }

    async fn create_collections(&mut self) -> Result<(), ProvisionError> {
        self.section("2. Creando colecciones")?;

        let collection = self.layer.query().collection;
        for name in [seed::USERS_COLLECTION, seed::PRODUCTS_COLLECTION] {
            collection.create(name).await?;
            writeln!(self.out, "✅ Colección '{name}' creada")?;
        }

        Ok(())
    }

    async fn insert_documents(&mut self) -> Result<(usize, usize), ProvisionError> {
        self.section("3. Insertando documentos de ejemplo")?;

        let collection = self.layer.query().collection;

        let users = collection
            .insert_many(seed::USERS_COLLECTION, seed::users())
            .await?;
        writeln!(self.out, "✅ {users} usuarios insertados")?;

        let products = collection
            .insert_many(seed::PRODUCTS_COLLECTION, seed::products())
            .await?;
        writeln!(self.out, "✅ {products} productos insertados")?;

        Ok((users, products))
    }

    async fn create_indexes(&mut self) -> Result<(), ProvisionError> {
        self.section("4. Creando índices para optimizar búsquedas")?;

        let index = self.layer.query().index;
        for descriptor in seed::indexes() {
            index.create(&descriptor).await?;

            let fields = descriptor.fields.join(", ");
            let collection = &descriptor.collection;
            let line = match &descriptor.kind {
                IndexKind::Unique => {
                    format!("✅ Índice único creado en el campo {fields} de {collection}")
                }
                IndexKind::Text { .. } => {
                    format!("✅ Índice de texto creado para búsquedas en {collection}")
                }
                IndexKind::Ascending if descriptor.is_compound() => {
                    format!("✅ Índice compuesto creado para {fields} de {collection}")
                }
                IndexKind::Ascending => {
                    format!("✅ Índice creado en el campo {fields} de {collection}")
                }
            };
            writeln!(self.out, "{line}")?;
        }

        Ok(())
    }

    async fn run_queries(&mut self) -> Result<(usize, usize, usize), ProvisionError> {
        self.section("5. Ejemplos de consultas")?;

        let collection = self.layer.query().collection;

        let total_users = collection.count(seed::USERS_COLLECTION, None).await?;
        writeln!(self.out, "📊 Total de usuarios en la base de datos: {total_users}")?;

        let active_users = collection
            .count(seed::USERS_COLLECTION, Some(seed::ACTIVE_USERS_FILTER))
            .await?;
        writeln!(self.out, "👥 Usuarios activos: {active_users}")?;

        let expensive_products = collection
            .count(
                seed::PRODUCTS_COLLECTION,
                Some(seed::EXPENSIVE_PRODUCTS_FILTER),
            )
            .await?;
        writeln!(
            self.out,
            "💎 Productos con precio mayor a $10,000: {expensive_products}"
        )?;

        Ok((total_users, active_users, expensive_products))
    }

    async fn create_accounts(&mut self) -> Result<(), ProvisionError> {
        self.section("6. Configurando usuarios y permisos")?;

        let account = self.layer.query().account;
        for descriptor in seed::accounts() {
            account.create(&descriptor).await?;

            let writes = descriptor
                .grants
                .iter()
                .any(|grant| grant.role == Role::ReadWrite);
            if writes {
                writeln!(
                    self.out,
                    "🔑 Usuario '{}' creado con permisos de lectura/escritura",
                    descriptor.username
                )?;
            } else {
                writeln!(
                    self.out,
                    "🔐 Usuario '{}' creado con permisos de solo lectura",
                    descriptor.username
                )?;
            }
        }

        Ok(())
    }

    async fn describe_system(
        &mut self,
    ) -> Result<(Vec<DatabaseSummary>, Vec<(String, usize)>), ProvisionError> {
        self.section("7. Información del sistema")?;

        let system = self.layer.query().system;

        let databases = system.list_databases().await?;
        writeln!(self.out, "📚 Bases de datos disponibles:")?;
        for database in &databases {
            writeln!(
                self.out,
                "   - {}/{} ({} colecciones, {} documentos)",
                database.namespace, database.name, database.collections, database.documents
            )?;
        }

        let collections = system.list_collections().await?;
        writeln!(self.out, "\n📂 Colecciones en la base de datos actual:")?;
        for (name, count) in &collections {
            writeln!(self.out, "   - {name}: {count} documentos")?;
        }

        Ok((databases, collections))
    }

    fn finish(&mut self) -> Result<(), ProvisionError> {
        writeln!(self.out, "\n🎉 ¡Guía de MongoDB completada exitosamente! 🎉")?;
        writeln!(self.out, "Puedes comenzar a ejecutar tus propias consultas.")?;
        writeln!(self.out, "Prueba algunos comandos como:")?;
        for query in seed::NEXT_QUERIES {
            writeln!(self.out, "  - {query}")?;
        }
        self.out.flush()?;

        Ok(())
    }
}
