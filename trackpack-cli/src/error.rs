//! Errors surfaced by the command line tool.

/// Top-level error for a CLI run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The payload argument is not hex.
    #[error("payload is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Encoding or decoding the payload failed.
    #[error(transparent)]
    Codec(#[from] trackpack::Error),

    /// Links could not be built from the decoded identifiers.
    #[error(transparent)]
    Links(#[from] trackpack::links::Error),

    /// Output could not be rendered as JSON.
    #[error("could not render output: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error reveals a bug in the codec rather than bad input.
    pub fn is_codec_defect(&self) -> bool {
        matches!(self, Error::Codec(error) if error.is_codec_defect())
    }
}
