use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Entity not found: {entity} without an id")]
    MissingId { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),
}
