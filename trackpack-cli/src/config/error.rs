/// Configuration error variants.
#[derive(Debug, thiserror::Error)]
pub enum TrackpackConfigError {
    /// A link setting is invalid.
    #[error("Invalid link configuration: {0}")]
    InvalidLinks(#[from] trackpack::links::Error),

    /// The log filter directives could not be parsed.
    #[error("Invalid logging directives '{directives}': {reason}")]
    InvalidLogDirectives {
        /// The rejected directives.
        directives: String,
        /// Why they were rejected.
        reason: String,
    },
}
