//! # AppApi
//!
//! [`AppApi`] is the closed set of tiers for callers that only know the access
//! level at runtime. [`AppApi::build`] is the single place where an
//! [`AccessLevel`] is mapped to a tier.
//!
//! Because the level is a value, `AppApi` implements every tier trait and
//! checks the level itself: an operation above it fails immediately with
//! [`ApiError::Unsupported`], before any request is built or sent. Callers who
//! want the compiler to rule such calls out use the tier types directly
//! (see [`Tier`]).

use super::endpoint::Endpoint;
use super::tiers::{
    CreateApi, CreateReadApi, CreateReadUpdateApi, CreateReadUpdateDeleteApi, DeleteApi, ReadApi,
    ReadonlyApi, Tier, UpdateApi,
};
use crate::access::{AccessLevel, Operation};
use crate::dto::Dto;
use crate::error::{ApiError, ApiResult};
use crate::route::Route;
use crate::transport::Transport;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// An API whose tier was chosen at runtime.
#[derive(Debug, Clone)]
pub enum AppApi<S: Dto> {
    Read(ReadonlyApi<S>),
    Create(CreateReadApi<S>),
    Update(CreateReadUpdateApi<S>),
    Delete(CreateReadUpdateDeleteApi<S>),
}

impl<S: Dto> AppApi<S> {
    /// Builds the tier matching `level` for `{base_api_url}/{route}`.
    pub fn build<R: Route + ?Sized>(
        transport: Arc<dyn Transport>,
        base_api_url: &str,
        route: &R,
        level: AccessLevel,
    ) -> ApiResult<Self> {
        let endpoint = Endpoint::new(transport, base_api_url, route)?;
        info!(url = %endpoint.url(), %level, "Built API");
        Ok(match level {
            AccessLevel::Read => AppApi::Read(ReadonlyApi::from_endpoint(endpoint)),
            AccessLevel::Create => AppApi::Create(CreateReadApi::from_endpoint(endpoint)),
            AccessLevel::Update => AppApi::Update(CreateReadUpdateApi::from_endpoint(endpoint)),
            AccessLevel::Delete => {
                AppApi::Delete(CreateReadUpdateDeleteApi::from_endpoint(endpoint))
            }
        })
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.level().allows(operation)
    }

    /// The exact operation set this API exposes.
    pub fn operations(&self) -> Vec<Operation> {
        self.level().operations()
    }

    fn require(&self, operation: Operation) -> ApiResult<()> {
        if self.supports(operation) {
            return Ok(());
        }
        let level = self.level();
        warn!(%operation, %level, path = self.endpoint().path(), "Operation not available");
        Err(ApiError::unsupported(operation, level))
    }
}

impl<S: Dto> ReadApi<S> for AppApi<S> {
    fn endpoint(&self) -> &Endpoint<S> {
        match self {
            AppApi::Read(api) => api.endpoint(),
            AppApi::Create(api) => api.endpoint(),
            AppApi::Update(api) => api.endpoint(),
            AppApi::Delete(api) => api.endpoint(),
        }
    }

    fn level(&self) -> AccessLevel {
        match self {
            AppApi::Read(_) => AccessLevel::Read,
            AppApi::Create(_) => AccessLevel::Create,
            AppApi::Update(_) => AccessLevel::Update,
            AppApi::Delete(_) => AccessLevel::Delete,
        }
    }
}

#[async_trait]
impl<S: Dto> CreateApi<S> for AppApi<S> {
    async fn create(&self, obj: S) -> ApiResult<S> {
        self.require(Operation::Create)?;
        self.endpoint().create(&obj).await
    }
}

#[async_trait]
impl<S: Dto> UpdateApi<S> for AppApi<S> {
    async fn update(&self, obj: S) -> ApiResult<S> {
        self.require(Operation::Update)?;
        self.endpoint().update(&obj).await
    }
}

#[async_trait]
impl<S: Dto> DeleteApi<S> for AppApi<S> {
    async fn delete_by_id(&self, id: &str) -> ApiResult<bool> {
        self.require(Operation::DeleteById)?;
        self.endpoint().delete_by_id(id).await
    }

    async fn delete_object(&self, obj: S) -> ApiResult<bool> {
        self.require(Operation::DeleteObject)?;
        self.endpoint().delete_object(&obj).await
    }
}

impl<S: Dto> From<ReadonlyApi<S>> for AppApi<S> {
    fn from(api: ReadonlyApi<S>) -> Self {
        AppApi::Read(api)
    }
}

impl<S: Dto> From<CreateReadApi<S>> for AppApi<S> {
    fn from(api: CreateReadApi<S>) -> Self {
        AppApi::Create(api)
    }
}

impl<S: Dto> From<CreateReadUpdateApi<S>> for AppApi<S> {
    fn from(api: CreateReadUpdateApi<S>) -> Self {
        AppApi::Update(api)
    }
}

impl<S: Dto> From<CreateReadUpdateDeleteApi<S>> for AppApi<S> {
    fn from(api: CreateReadUpdateDeleteApi<S>) -> Self {
        AppApi::Delete(api)
    }
}
