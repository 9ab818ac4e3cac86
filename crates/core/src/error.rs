#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("patient '{0}' not found")]
    NotFound(String),
    #[error("patient '{0}' already exists")]
    AlreadyExists(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("patient data file does not exist: {path}", path = path.display())]
    StoreMissing { path: std::path::PathBuf },
    #[error("failed to create patient data file: {0}")]
    StoreCreation(std::io::Error),
    #[error("failed to write patient data file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read patient data file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize patients: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patients: {0}")]
    Deserialization(String),
}

impl PatientError {
    /// Returns `true` for failures of the backing document rather than of the request.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            PatientError::StoreMissing { .. }
                | PatientError::StoreCreation(_)
                | PatientError::FileWrite(_)
                | PatientError::FileRead(_)
                | PatientError::Serialization(_)
                | PatientError::Deserialization(_)
        )
    }
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
