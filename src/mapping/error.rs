use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappingError {
    /// Mapping file could not be read
    #[error("Failed to read mapping file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error ({context}): {source}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("JSON parse error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Element shape the flattener cannot accept
    #[error("Malformed element at {path}: {reason}")]
    MalformedElement { path: String, reason: String },
}
