use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Absolute links require a base_url")]
    MissingBaseUrl,

    #[error("Path template '{0}' has no {{id}} placeholder")]
    MissingIdPlaceholder(String),

    #[error("Failed to read rows from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Rows in {path} are not a list of objects: {reason}")]
    RowFormat { path: String, reason: String },
}
