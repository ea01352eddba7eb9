use thiserror::Error;

/// Everything that can go wrong while registering or rendering a template.
///
/// Parse errors are fatal to the `register` call that produced them and
/// leave the previously cached entry untouched. Evaluation errors
/// (`UnknownHelper`, `Helper`, `PartialDepth`) are caught at the render
/// boundary and turned into a visible error fragment instead of
/// propagating to the caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unclosed expression at line {line}, column {column}, did you forget \"{end}\"?")]
    UnclosedExpression {
        line: usize,
        column: usize,
        end: String,
    },

    #[error("block \"{0}\" is never closed, did you forget a closing marker?")]
    UnclosedBlock(String),

    #[error("closing marker \"/{0}\" has no matching open block")]
    UnexpectedBlockClose(String),

    #[error("syntax error in expression \"{0}\"")]
    Syntax(String),

    #[error("template \"{0}\" is not registered")]
    TemplateNotFound(String),

    #[error("helper \"{0}\" is not defined")]
    UnknownHelper(String),

    #[error("helper \"{helper}\" failed: {message}")]
    Helper { helper: String, message: String },

    #[error("partial \"{0}\" is included too deeply, possible inclusion cycle")]
    PartialDepth(String),

    #[error("failed to format a timestamp: \"{0}\"")]
    TimeFormat(#[from] time::error::Format),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a helper failure.
    pub fn helper(helper: impl ToString, message: impl ToString) -> Self {
        Error::Helper {
            helper: helper.to_string(),
            message: message.to_string(),
        }
    }
}
