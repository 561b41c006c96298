//! Domain error types.

/// A parse error inside a text block, with its position in the file.
///
/// `block` is the 1-based ordinal of the block, `line` the 1-based line
/// number in the file where the problem was found.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("block {block}, line {line}: {message}")]
pub struct ParseError {
    pub message: String,
    pub block: usize,
    pub line: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, block: usize, line: usize) -> Self {
        Self {
            message: message.into(),
            block,
            line,
        }
    }
}

/// Top-level error type for realfin.
#[derive(Debug, thiserror::Error)]
pub enum RealfinError {
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("unknown property type in block {block} (line {line})")]
    UnknownVariant { block: usize, line: usize },

    #[error(transparent)]
    BlockParse(#[from] ParseError),

    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("malformed snapshot: {reason}")]
    MalformedSnapshot { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RealfinError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RealfinError::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&RealfinError> for std::process::ExitCode {
    fn from(err: &RealfinError) -> Self {
        let code: u8 = match err {
            RealfinError::Io(_) => 1,
            RealfinError::ConfigParse { .. }
            | RealfinError::ConfigInvalid { .. } => 2,
            RealfinError::InvalidArgument { .. } => 3,
            RealfinError::UnknownVariant { .. } | RealfinError::BlockParse(_) => 4,
            RealfinError::NotFound { .. } | RealfinError::MalformedSnapshot { .. } => 5,
            RealfinError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
