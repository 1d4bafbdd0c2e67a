//! # Data Transfer Object Contract
//!
//! The [`Dto`] trait is the shape every remotely synced entity must satisfy.
//! Date/time values are milliseconds since the Unix epoch.
//!
//! DTOs are value objects. The `id` is assigned by the remote system and never
//! changes; an "edit" produces a new DTO value rather than mutating one in place.

use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Wire-format representation of a domain entity.
///
/// `last_modified_date_time` and `last_modified_by_user_id` travel together:
/// either both are present or both are absent. See [`check_shape`].
pub trait Dto: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn created_date_time(&self) -> i64;
    fn created_by_user_id(&self) -> &str;
    fn last_modified_date_time(&self) -> Option<i64>;
    fn last_modified_by_user_id(&self) -> Option<&str>;
}

/// Checks the modification pair invariant.
pub fn check_shape<S: Dto>(dto: &S) -> ApiResult<()> {
    match (dto.last_modified_date_time(), dto.last_modified_by_user_id()) {
        (Some(_), Some(_)) | (None, None) => Ok(()),
        (Some(_), None) => Err(ApiError::InvalidShape {
            id: dto.id().to_string(),
            reason: "lastModifiedDateTime is set without lastModifiedByUserId".into(),
        }),
        (None, Some(_)) => Err(ApiError::InvalidShape {
            id: dto.id().to_string(),
            reason: "lastModifiedByUserId is set without lastModifiedDateTime".into(),
        }),
    }
}
