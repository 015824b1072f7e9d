use sea_orm::error::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Activity log error: {0}")]
    LogWriteError(#[from] std::io::Error),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub type AppError = ServiceError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_convert_into_database_errors() {
        let err: ServiceError = DbErr::Custom("connection refused".into()).into();
        assert!(matches!(err, ServiceError::DatabaseError(_)));
        assert_eq!(
            err.to_string(),
            "Database error: Custom Error: connection refused"
        );
    }

    #[test]
    fn io_errors_become_log_write_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: ServiceError = io.into();
        assert!(matches!(err, ServiceError::LogWriteError(_)));
        assert_eq!(err.to_string(), "Activity log error: read-only");
    }
}
