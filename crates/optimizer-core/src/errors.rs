use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup
    NotFound,

    // Data integrity
    /// A stored config payload could not be deserialized
    CorruptData,
    ConstraintViolation,

    // Input
    /// Caller-supplied data that cannot describe an optimizer
    InvalidInput,

    // Integration/IO
    /// Transport-level failure talking to the store (open, busy, locked, I/O)
    Connection,
    Serialization,
    Persistence,
    /// Reading caller-supplied files
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::CorruptData => "ERR_CORRUPT_DATA",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Connection => "ERR_CONNECTION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus the operation name and entity id
/// needed to log and surface the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised while resolving or reconstituting optimizers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    /// No optimizer row exists for the id
    #[error("Optimizer not found: {optimizer_id}")]
    NotFound { optimizer_id: i64 },

    /// The request carried an id that is not an integer
    #[error("Optimizer id is not numeric: {raw}")]
    NonNumericId { raw: String },

    /// The stored config payload is not valid
    #[error("Optimizer {optimizer_id} has a corrupt config payload: {reason}")]
    CorruptConfig { optimizer_id: i64, reason: String },

    /// The config value could not be written out
    #[error("Failed to serialize optimizer config: {reason}")]
    ConfigSerialization { reason: String },
}

impl From<OptimizerError> for ExError {
    fn from(err: OptimizerError) -> Self {
        let message = err.to_string();
        match err {
            OptimizerError::NotFound { optimizer_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(optimizer_id)
                .with_message(message),
            OptimizerError::NonNumericId { raw } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(raw)
                .with_message(message),
            OptimizerError::CorruptConfig { optimizer_id, .. } => {
                ExError::new(ExErrorKind::CorruptData)
                    .with_entity_id(optimizer_id)
                    .with_message(message)
            }
            OptimizerError::ConfigSerialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}
