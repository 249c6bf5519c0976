/// A compile-time failure recorded by the parsing context.
///
/// `path` holds the argument indices from the root expression down to the
/// failure site; it renders as the style-spec key trail `[1][2]`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.path, .message))]
pub struct ParsingError {
    /// Argument index trail from root to failure site.
    pub path: Vec<usize>,
    /// Human-readable message.
    pub message: String,
}

impl ParsingError {
    pub(crate) fn new(path: Vec<usize>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// The bracketed key trail, e.g. `[2][1]`. Empty for root errors.
    pub fn key(&self) -> String {
        key_for(&self.path)
    }
}

pub(crate) fn key_for(path: &[usize]) -> String {
    path.iter().map(|i| format!("[{i}]")).collect()
}

fn render(path: &[usize], message: &str) -> String {
    if path.is_empty() {
        message.to_owned()
    } else {
        format!("{}: {message}", key_for(path))
    }
}

/// An evaluation-time failure. Aborts evaluation of the current tree.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RuntimeError {
    /// Human-readable message.
    pub message: String,
}

impl RuntimeError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
