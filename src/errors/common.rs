use derive_more::{Display, Error, From};

#[derive(Debug, Display, Error, From)]
pub enum ProvisionError {
    #[display("Database error: {_0}")]
    Database(surrealdb::Error),
    #[display("Invalid configuration: {_0}")]
    Validation(validator::ValidationErrors),
    #[display("Could not write progress output: {_0}")]
    Output(std::io::Error),
}

impl ProvisionError {
    pub fn error_name(&self) -> &str {
        match self {
            ProvisionError::Database(_) => "Database Error",
            ProvisionError::Validation(_) => "Validation Error",
            ProvisionError::Output(_) => "Output Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_keep_their_message() {
        let error: ProvisionError =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed").into();

        assert_eq!(error.error_name(), "Output Error");
        assert_eq!(
            error.to_string(),
            "Could not write progress output: pipe closed"
        );
    }
}
