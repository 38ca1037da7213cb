use surrealdb::{engine::any::Any, Surreal};
use validator::ValidationError;

use super::invalid_request;
use crate::utils::validation::{validate_field_path, validate_identifier};

#[derive(Debug, Clone, PartialEq)]
pub enum IndexKind {
    Ascending,
    Unique,
    /// Full-text search with a stemming analyzer for `language`.
    Text { language: String },
}

#[derive(Debug, Clone)]
pub struct IndexDescriptor {
    pub collection: String,
    pub name: String,
    pub fields: Vec<String>,
    pub kind: IndexKind,
}

impl IndexDescriptor {
    pub fn new(collection: &str, name: &str, fields: &[&str], kind: IndexKind) -> Self {
        IndexDescriptor {
            collection: String::from(collection),
            name: String::from(name),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            kind,
        }
    }

    pub fn is_compound(&self) -> bool {
        self.fields.len() > 1
    }

    fn analyzer_name(&self) -> String {
        format!("{}_analyzer", self.name)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_identifier(&self.collection)?;
        validate_identifier(&self.name)?;

        if self.fields.is_empty() {
            let mut error = ValidationError::new("no_fields");
            error.message = Some("An index needs at least one field".into());
            return Err(error);
        }
        for field in &self.fields {
            validate_field_path(field)?;
        }

        if let IndexKind::Text { language } = &self.kind {
            validate_identifier(language)?;
        }

        Ok(())
    }

    /// Statements that bring the index into existence, in execution order.
    pub fn statements(&self) -> Vec<String> {
        let fields = self.fields.join(", ");
        let target = format!(
            "DEFINE INDEX {} ON TABLE {} FIELDS {}",
            self.name, self.collection, fields
        );

        match &self.kind {
            IndexKind::Ascending => vec![format!("{target};")],
            IndexKind::Unique => vec![format!("{target} UNIQUE;")],
            IndexKind::Text { language } => vec![
                format!(
                    "DEFINE ANALYZER {} TOKENIZERS blank, class FILTERS lowercase, ascii, snowball({language});",
                    self.analyzer_name()
                ),
                format!(
                    "{target} SEARCH ANALYZER {} BM25 HIGHLIGHTS;",
                    self.analyzer_name()
                ),
            ],
        }
    }
}

#[derive(Clone)]
pub struct IndexQuery<'a> {
    db: &'a Surreal<Any>,
}

impl<'a> IndexQuery<'a> {
    pub(crate) fn new(db: &'a Surreal<Any>) -> Self {
        Self { db }
    }
}

impl<'a> IndexQuery<'a> {
    /// The engine refuses a unique index over data that already holds
    /// duplicates, and enforces it on every later write.
    pub async fn create(&self, index: &IndexDescriptor) -> Result<(), surrealdb::Error> {
        index.validate().map_err(invalid_request)?;

        for statement in index.statements() {
            self.db.query(statement).await?.check()?;
        }

        tracing::debug!(
            collection = %index.collection,
            index = %index.name,
            compound = index.is_compound(),
            "index defined"
        );

        Ok(())
    }
}
