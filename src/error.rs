//! Error types for the scanning engine

use thiserror::Error;

/// Errors surfaced by the library.
///
/// Adapter-level I/O failures (unreadable file, unreachable URL) are not
/// errors; they become scan diagnostics so a scan always produces a result.
/// The variants here cover initialization and request parsing, where failing
/// fast is the right behavior.
#[derive(Debug, Error)]
pub enum Error {
    /// A detection rule failed to compile. Fatal at startup: the rule tables
    /// ship with the binary, so this is a packaging defect.
    #[error("invalid pattern for rule '{id}': {source}")]
    Rule {
        id: &'static str,
        source: regex::Error,
    },

    /// The context keyword automaton could not be built.
    #[error("failed to build keyword matcher: {0}")]
    Keywords(#[from] aho_corasick::BuildError),

    /// The scan request JSON could not be parsed.
    #[error("invalid scan request: {0}")]
    Request(#[from] serde_json::Error),

    /// Configuration file was present but unparsable.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
