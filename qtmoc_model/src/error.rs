use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("class {name} is declared more than once")]
    DuplicateClass { name: String },
    #[error("invalid library module {module}: {source}")]
    Library {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}
