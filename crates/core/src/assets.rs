//! Identity rules for the asset entity.
//!
//! Stores and the service layer share these checks so a payload is judged
//! the same way no matter which side of the store boundary rejects it.

use crate::error::CoreError;
use crate::types::DbId;

/// Entity name used in error messages and response headers.
pub const ENTITY_NAME: &str = "Asset";

/// Message returned when a create payload declares its own identity.
pub const ID_EXISTS_MESSAGE: &str = "A new asset cannot already have an ID";

/// Reject a payload that carries an `id` on creation.
pub fn ensure_unassigned(id: Option<DbId>) -> Result<(), CoreError> {
    match id {
        Some(_) => Err(CoreError::Validation(ID_EXISTS_MESSAGE.to_string())),
        None => Ok(()),
    }
}

/// Extract the `id` an update payload must carry.
///
/// A missing id can never match a stored record, so it is reported as
/// not-found rather than as a validation failure.
pub fn require_assigned(id: Option<DbId>) -> Result<DbId, CoreError> {
    id.ok_or(CoreError::MissingId {
        entity: ENTITY_NAME,
    })
}
