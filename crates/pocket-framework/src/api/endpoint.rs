//! # Endpoint
//!
//! An [`Endpoint`] binds a transport to one resource collection
//! (`{baseApiUrl}/{path}`) and carries the request logic shared by every API
//! tier. The tiers only decide *which* of these operations are reachable.

use crate::dto::{check_shape, Dto};
use crate::error::{ApiError, ApiResult};
use crate::route::Route;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

/// Transport handle, base URL and resolved path for one resource collection.
pub struct Endpoint<S> {
    transport: Arc<dyn Transport>,
    base_api_url: Url,
    path: String,
    url: Url,
    _dto: PhantomData<fn() -> S>,
}

impl<S> Clone for Endpoint<S> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_api_url: self.base_api_url.clone(),
            path: self.path.clone(),
            url: self.url.clone(),
            _dto: PhantomData,
        }
    }
}

impl<S> fmt::Debug for Endpoint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_api_url", &self.base_api_url.as_str())
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<S: Dto> Endpoint<S> {
    /// Resolves `{base_api_url}/{route}`.
    ///
    /// The base URL is treated as a directory, so `http://host/api/v2` and
    /// `http://host/api/v2/` both resolve `User` to `http://host/api/v2/User`.
    pub fn new<R: Route + ?Sized>(
        transport: Arc<dyn Transport>,
        base_api_url: &str,
        route: &R,
    ) -> ApiResult<Self> {
        let mut base = Url::parse(base_api_url)
            .map_err(|e| ApiError::InvalidUrl(format!("'{}': {}", base_api_url, e)))?;
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let path = route.path().trim_matches('/').to_string();
        if path.is_empty() {
            return Err(ApiError::InvalidUrl("route path is empty".into()));
        }
        let url = base.join(&path).map_err(|e| {
            ApiError::InvalidUrl(format!("cannot join '{}' to '{}': {}", path, base, e))
        })?;

        Ok(Self {
            transport,
            base_api_url: base,
            path,
            url,
            _dto: PhantomData,
        })
    }

    pub fn base_api_url(&self) -> &Url {
        &self.base_api_url
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The resolved collection URL every request targets.
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn request(&self, method: Method) -> HttpRequest {
        HttpRequest::new(method, self.url.clone())
    }

    #[instrument(skip(self), fields(path = %self.path))]
    pub async fn get_by_id(&self, id: &str) -> ApiResult<S> {
        let response = self
            .transport
            .send(self.request(Method::Get).with_query("id", id))
            .await?;
        if response.status == 404 {
            return Err(ApiError::NotFound {
                path: self.path.clone(),
                id: id.to_string(),
            });
        }
        let dto: S = response.json()?;
        check_shape(&dto)?;
        Ok(dto)
    }

    #[instrument(skip(self), fields(path = %self.path, count = ids.len()))]
    pub async fn get_all_by_ids(&self, ids: &[String]) -> ApiResult<Vec<S>> {
        if ids.is_empty() {
            debug!("Empty id list, nothing to fetch");
            return Ok(Vec::new());
        }
        let response = self
            .transport
            .send(self.request(Method::Post).with_body(encode(ids)?))
            .await?;
        let dtos: Vec<S> = response.json()?;
        for dto in &dtos {
            check_shape(dto)?;
        }
        Ok(dtos)
    }

    #[instrument(skip(self, obj), fields(path = %self.path, id = obj.id()))]
    pub async fn create(&self, obj: &S) -> ApiResult<S> {
        check_shape(obj)?;
        let response = self
            .transport
            .send(self.request(Method::Post).with_body(encode(obj)?))
            .await?;
        let dto: S = response.json()?;
        check_shape(&dto)?;
        Ok(dto)
    }

    #[instrument(skip(self, obj), fields(path = %self.path, id = obj.id()))]
    pub async fn update(&self, obj: &S) -> ApiResult<S> {
        check_shape(obj)?;
        let response = self
            .transport
            .send(self.request(Method::Put).with_body(encode(obj)?))
            .await?;
        let dto: S = response.json()?;
        check_shape(&dto)?;
        Ok(dto)
    }

    #[instrument(skip(self), fields(path = %self.path))]
    pub async fn delete_by_id(&self, id: &str) -> ApiResult<bool> {
        let response = self
            .transport
            .send(self.request(Method::Delete).with_query("id", id))
            .await?;
        removed(response)
    }

    /// Only the id of `obj` identifies the target, so its shape is not checked
    /// and the outcome matches [`Endpoint::delete_by_id`].
    #[instrument(skip(self, obj), fields(path = %self.path, id = obj.id()))]
    pub async fn delete_object(&self, obj: &S) -> ApiResult<bool> {
        let response = self
            .transport
            .send(self.request(Method::Delete).with_body(encode(obj)?))
            .await?;
        removed(response)
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))
}

// A missing resource was not removed.
fn removed(response: HttpResponse) -> ApiResult<bool> {
    if response.status == 404 {
        return Ok(false);
    }
    response.json()
}
