//! # Capability Tiers
//!
//! Four API types, each exposing a strictly wider set of operations:
//!
//! | Type | Traits | Operations |
//! |------|--------|------------|
//! | [`ReadonlyApi`] | [`ReadApi`] | get-by-id, get-all-by-ids |
//! | [`CreateReadApi`] | + [`CreateApi`] | + create |
//! | [`CreateReadUpdateApi`] | + [`UpdateApi`] | + update |
//! | [`CreateReadUpdateDeleteApi`] | + [`DeleteApi`] | + delete-by-id, delete-object |
//!
//! The traits form a supertrait chain, and a tier type only implements the
//! traits of its own level. Calling `create` on a [`ReadonlyApi`] is therefore
//! a compile error, not a runtime failure.
//!
//! The request logic lives once on [`Endpoint`]; the provided trait methods
//! delegate to it, so a tier type only has to hand out its endpoint.

use super::endpoint::Endpoint;
use crate::access::AccessLevel;
use crate::dto::Dto;
use crate::error::ApiResult;
use async_trait::async_trait;

/// Read access: the base of every tier.
#[async_trait]
pub trait ReadApi<S: Dto>: Send + Sync {
    /// The endpoint the provided operations delegate to.
    fn endpoint(&self) -> &Endpoint<S>;

    /// Access level this API was built for.
    fn level(&self) -> AccessLevel;

    /// Fetches one resource by id.
    async fn get_by_id(&self, id: &str) -> ApiResult<S> {
        self.endpoint().get_by_id(id).await
    }

    /// Fetches several resources in one request. An empty list yields an empty result.
    async fn get_all_by_ids(&self, ids: &[String]) -> ApiResult<Vec<S>> {
        self.endpoint().get_all_by_ids(ids).await
    }
}

/// Adds creation on top of [`ReadApi`].
#[async_trait]
pub trait CreateApi<S: Dto>: ReadApi<S> {
    /// Submits a new resource and returns it as persisted.
    async fn create(&self, obj: S) -> ApiResult<S> {
        self.endpoint().create(&obj).await
    }
}

/// Adds full-object replacement on top of [`CreateApi`].
#[async_trait]
pub trait UpdateApi<S: Dto>: CreateApi<S> {
    /// Replaces the resource keyed by `obj.id()` and returns it as persisted.
    async fn update(&self, obj: S) -> ApiResult<S> {
        self.endpoint().update(&obj).await
    }
}

/// Adds both removal forms on top of [`UpdateApi`].
#[async_trait]
pub trait DeleteApi<S: Dto>: UpdateApi<S> {
    /// Removes the resource with `id`. `Ok(false)` when nothing was removed.
    async fn delete_by_id(&self, id: &str) -> ApiResult<bool> {
        self.endpoint().delete_by_id(id).await
    }

    /// Removes the resource identified by `obj.id()`.
    async fn delete_object(&self, obj: S) -> ApiResult<bool> {
        self.endpoint().delete_object(&obj).await
    }
}

/// A tier type that can be built directly from an [`Endpoint`].
///
/// Used for statically typed construction, where the access level is part of
/// the type rather than a runtime value.
pub trait Tier<S: Dto>: ReadApi<S> + Sized + 'static {
    const LEVEL: AccessLevel;

    fn from_endpoint(endpoint: Endpoint<S>) -> Self;
}

macro_rules! tier {
    ($(#[$meta:meta])* $name:ident => $level:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<S: Dto> {
            endpoint: Endpoint<S>,
        }

        impl<S: Dto> ReadApi<S> for $name<S> {
            fn endpoint(&self) -> &Endpoint<S> {
                &self.endpoint
            }

            fn level(&self) -> AccessLevel {
                $level
            }
        }

        impl<S: Dto> Tier<S> for $name<S> {
            const LEVEL: AccessLevel = $level;

            fn from_endpoint(endpoint: Endpoint<S>) -> Self {
                Self { endpoint }
            }
        }
    };
}

tier! {
    /// Read-only access to a resource collection.
    ReadonlyApi => AccessLevel::Read
}

tier! {
    /// Read and create access.
    CreateReadApi => AccessLevel::Create
}

tier! {
    /// Read, create and update access.
    CreateReadUpdateApi => AccessLevel::Update
}

tier! {
    /// Complete CRUD access.
    CreateReadUpdateDeleteApi => AccessLevel::Delete
}

impl<S: Dto> CreateApi<S> for CreateReadApi<S> {}

impl<S: Dto> CreateApi<S> for CreateReadUpdateApi<S> {}
impl<S: Dto> UpdateApi<S> for CreateReadUpdateApi<S> {}

impl<S: Dto> CreateApi<S> for CreateReadUpdateDeleteApi<S> {}
impl<S: Dto> UpdateApi<S> for CreateReadUpdateDeleteApi<S> {}
impl<S: Dto> DeleteApi<S> for CreateReadUpdateDeleteApi<S> {}

/// Calls above a tier's level do not compile.
///
/// ```
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{CreateApi, CreateReadUpdateDeleteApi, DeleteApi, UpdateApi};
///
/// fn call(api: &CreateReadUpdateDeleteApi<MockDto>) {
///     let _ = api.create(MockDto::new("", "Cy"));
///     let _ = api.update(MockDto::new("n1", "Cy"));
///     let _ = api.delete_by_id("n1");
///     let _ = api.delete_object(MockDto::new("n1", "Cy"));
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{CreateApi, ReadonlyApi};
///
/// fn call(api: &ReadonlyApi<MockDto>) {
///     let _ = api.create(MockDto::new("", "Cy"));
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{UpdateApi, ReadonlyApi};
///
/// fn call(api: &ReadonlyApi<MockDto>) {
///     let _ = api.update(MockDto::new("n1", "Cy"));
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{DeleteApi, ReadonlyApi};
///
/// fn call(api: &ReadonlyApi<MockDto>) {
///     let _ = api.delete_by_id("n1");
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{DeleteApi, ReadonlyApi};
///
/// fn call(api: &ReadonlyApi<MockDto>) {
///     let _ = api.delete_object(MockDto::new("n1", "Cy"));
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{UpdateApi, CreateReadApi};
///
/// fn call(api: &CreateReadApi<MockDto>) {
///     let _ = api.update(MockDto::new("n1", "Cy"));
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{DeleteApi, CreateReadApi};
///
/// fn call(api: &CreateReadApi<MockDto>) {
///     let _ = api.delete_by_id("n1");
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{DeleteApi, CreateReadApi};
///
/// fn call(api: &CreateReadApi<MockDto>) {
///     let _ = api.delete_object(MockDto::new("n1", "Cy"));
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{DeleteApi, CreateReadUpdateApi};
///
/// fn call(api: &CreateReadUpdateApi<MockDto>) {
///     let _ = api.delete_by_id("n1");
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{DeleteApi, CreateReadUpdateApi};
///
/// fn call(api: &CreateReadUpdateApi<MockDto>) {
///     let _ = api.delete_object(MockDto::new("n1", "Cy"));
/// }
/// ```
#[cfg(doctest)]
pub struct OutOfTierCalls;
