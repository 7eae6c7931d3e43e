//! Error kinds that abort a run, and the exit code each one maps to.
//!
//! Every failure in sunbar is fatal: the menu-bar host will invoke the plugin
//! again on its next tick, so nothing is retried and no partial status is printed.
//! Functions return `anyhow::Result` with context attached along the way; the
//! top-level handler in `main` looks for a [`SunbarError`] in the chain to pick an
//! exit code.

use thiserror::Error;

pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum SunbarError {
    #[error("could not determine the home directory")]
    HomeDirectoryUnavailable,

    #[error("cache file {path}: {source}")]
    CacheIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} returned HTTP {status}\n{body}")]
    UpstreamHttp {
        url: String,
        status: u16,
        body: String,
    },

    #[error("could not decode {what}: {message}")]
    Decode { what: String, message: String },

    #[error("invalid time of day '{value}': {message}")]
    DateParse { value: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl SunbarError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SunbarError::HomeDirectoryUnavailable => 2,
            SunbarError::CacheIo { .. } => 3,
            SunbarError::Network { .. } => 4,
            SunbarError::UpstreamHttp { .. } => 5,
            SunbarError::Decode { .. } => 6,
            SunbarError::DateParse { .. } => 7,
            SunbarError::Config(_) => 8,
        }
    }

    pub(crate) fn cache_io(path: &std::path::Path, source: std::io::Error) -> Self {
        SunbarError::CacheIo {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn decode(what: impl Into<String>, message: impl std::fmt::Display) -> Self {
        SunbarError::Decode {
            what: what.into(),
            message: message.to_string(),
        }
    }
}

/// Exit code for an error chain, falling back to [`EXIT_FAILURE`].
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<SunbarError>())
        .map_or(EXIT_FAILURE, SunbarError::exit_code)
}
