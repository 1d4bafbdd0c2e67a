//! # Repository
//!
//! A [`Repository`] bridges an API tier (wire level, DTO typed) to application
//! code (model level). Every method:
//!
//! 1. dispatches one task on the repository's [`Dispatcher`] and returns at once;
//! 2. runs the matching API operation inside that task;
//! 3. on success passes the result through the [`Mapper`] (deletes pass their
//!    `bool` through unchanged) and calls `on_success`;
//! 4. on failure calls `on_failure` with the error as produced, unmapped.
//!
//! Exactly one of the two callbacks runs, exactly once. If the dispatcher
//! drops the task without running it (for example because its runtime has shut
//! down), `on_failure` receives [`ApiError::Dispatch`].
//!
//! Which methods exist depends on the API type: `create` needs
//! [`CreateApi`], `update` needs [`UpdateApi`], the deletes need [`DeleteApi`].
//! A `Repository<ReadonlyApi<_>, _, _>` has no `create` method at all.

use crate::access::AccessLevel;
use crate::api::{CreateApi, DeleteApi, ReadApi, UpdateApi};
use crate::dispatcher::Dispatcher;
use crate::dto::Dto;
use crate::error::{ApiError, ApiResult};
use std::fmt::Display;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pure conversion from a DTO to an application model.
///
/// A mapper that fails, or panics, turns the operation into a failure
/// ([`ApiError::Mapping`]) instead of crashing the dispatched task.
pub struct Mapper<S, T> {
    f: Arc<dyn Fn(S) -> ApiResult<T> + Send + Sync>,
}

impl<S, T> Clone for Mapper<S, T> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<S: 'static, T: 'static> Mapper<S, T> {
    pub fn new(f: impl Fn(S) -> T + Send + Sync + 'static) -> Self {
        Self {
            f: Arc::new(move |dto| Ok(f(dto))),
        }
    }

    pub fn fallible<E: Display>(f: impl Fn(S) -> Result<T, E> + Send + Sync + 'static) -> Self {
        Self {
            f: Arc::new(move |dto| f(dto).map_err(|e| ApiError::Mapping(e.to_string()))),
        }
    }

    pub fn apply(&self, dto: S) -> ApiResult<T> {
        panic::catch_unwind(AssertUnwindSafe(|| (self.f)(dto)))
            .unwrap_or_else(|_| Err(ApiError::Mapping("mapper panicked".into())))
    }
}

impl<S: 'static> Mapper<S, S> {
    pub fn identity() -> Self {
        Self::new(|dto| dto)
    }
}

/// Asynchronous, callback-based access to one resource collection.
pub struct Repository<A, S, T> {
    api: Arc<A>,
    mapper: Mapper<S, T>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl<A, S, T> Clone for Repository<A, S, T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            mapper: self.mapper.clone(),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<A, S, T> Repository<A, S, T>
where
    A: ReadApi<S> + 'static,
    S: Dto,
    T: Send + 'static,
{
    pub fn new(api: A, mapper: Mapper<S, T>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            api: Arc::new(api),
            mapper,
            dispatcher,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn level(&self) -> AccessLevel {
        self.api.level()
    }

    fn spawn(&self, operation: &'static str, work: impl Future<Output = ()> + Send + 'static) {
        debug!(operation, path = self.api.endpoint().path(), "Dispatching");
        self.dispatcher.dispatch(Box::pin(work));
    }

    /// Fetches one resource and delivers the mapped model.
    pub fn get<F, E>(&self, id: impl Into<String>, on_success: F, on_failure: E)
    where
        F: FnOnce(T) + Send + 'static,
        E: FnOnce(ApiError) + Send + 'static,
    {
        let id = id.into();
        let api = Arc::clone(&self.api);
        let mapper = self.mapper.clone();
        let callbacks = Callbacks::new("get", on_success, on_failure);
        self.spawn("get", async move {
            let result = api.get_by_id(&id).await.and_then(|dto| mapper.apply(dto));
            callbacks.complete(result);
        });
    }

    /// Fetches several resources in one request and delivers the mapped models
    /// in response order. Any mapping failure fails the whole call.
    pub fn get_list<F, E>(&self, ids: Vec<String>, on_success: F, on_failure: E)
    where
        F: FnOnce(Vec<T>) + Send + 'static,
        E: FnOnce(ApiError) + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let mapper = self.mapper.clone();
        let callbacks = Callbacks::new("get_list", on_success, on_failure);
        self.spawn("get_list", async move {
            let result = api.get_all_by_ids(&ids).await.and_then(|dtos| {
                dtos.into_iter()
                    .map(|dto| mapper.apply(dto))
                    .collect::<ApiResult<Vec<T>>>()
            });
            callbacks.complete(result);
        });
    }
}

impl<A, S, T> Repository<A, S, T>
where
    A: CreateApi<S> + 'static,
    S: Dto,
    T: Send + 'static,
{
    /// Submits a new resource and delivers the mapped, persisted result.
    pub fn create<F, E>(&self, obj: S, on_success: F, on_failure: E)
    where
        F: FnOnce(T) + Send + 'static,
        E: FnOnce(ApiError) + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let mapper = self.mapper.clone();
        let callbacks = Callbacks::new("create", on_success, on_failure);
        self.spawn("create", async move {
            let result = api.create(obj).await.and_then(|dto| mapper.apply(dto));
            callbacks.complete(result);
        });
    }
}

impl<A, S, T> Repository<A, S, T>
where
    A: UpdateApi<S> + 'static,
    S: Dto,
    T: Send + 'static,
{
    /// Replaces a resource and delivers the mapped, persisted result.
    pub fn update<F, E>(&self, obj: S, on_success: F, on_failure: E)
    where
        F: FnOnce(T) + Send + 'static,
        E: FnOnce(ApiError) + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let mapper = self.mapper.clone();
        let callbacks = Callbacks::new("update", on_success, on_failure);
        self.spawn("update", async move {
            let result = api.update(obj).await.and_then(|dto| mapper.apply(dto));
            callbacks.complete(result);
        });
    }
}

impl<A, S, T> Repository<A, S, T>
where
    A: DeleteApi<S> + 'static,
    S: Dto,
    T: Send + 'static,
{
    /// Removes the resource with `id`; `on_success` receives whether anything was removed.
    pub fn delete<F, E>(&self, id: impl Into<String>, on_success: F, on_failure: E)
    where
        F: FnOnce(bool) + Send + 'static,
        E: FnOnce(ApiError) + Send + 'static,
    {
        let id = id.into();
        let api = Arc::clone(&self.api);
        let callbacks = Callbacks::new("delete", on_success, on_failure);
        self.spawn("delete", async move {
            let result = api.delete_by_id(&id).await;
            callbacks.complete(result);
        });
    }

    /// Removes the resource identified by `obj`.
    pub fn delete_object<F, E>(&self, obj: S, on_success: F, on_failure: E)
    where
        F: FnOnce(bool) + Send + 'static,
        E: FnOnce(ApiError) + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let callbacks = Callbacks::new("delete_object", on_success, on_failure);
        self.spawn("delete_object", async move {
            let result = api.delete_object(obj).await;
            callbacks.complete(result);
        });
    }
}

/// The pair of callbacks for one call. Travels inside the dispatched task so
/// that a task dropped unrun still reports through `on_failure`.
struct Callbacks<F, E>
where
    E: FnOnce(ApiError),
{
    operation: &'static str,
    pending: Option<(F, E)>,
}

impl<F, E> Callbacks<F, E>
where
    E: FnOnce(ApiError),
{
    fn new(operation: &'static str, on_success: F, on_failure: E) -> Self {
        Self {
            operation,
            pending: Some((on_success, on_failure)),
        }
    }

    fn complete<V>(mut self, result: ApiResult<V>)
    where
        F: FnOnce(V),
    {
        let Some((on_success, on_failure)) = self.pending.take() else {
            return;
        };
        match result {
            Ok(value) => {
                info!(operation = self.operation, "Succeeded");
                on_success(value)
            }
            Err(e) => {
                warn!(operation = self.operation, error = %e, "Failed");
                on_failure(e)
            }
        }
    }
}

impl<F, E> Drop for Callbacks<F, E>
where
    E: FnOnce(ApiError),
{
    fn drop(&mut self) {
        if let Some((_, on_failure)) = self.pending.take() {
            let e = ApiError::Dispatch("task dropped before completion".into());
            warn!(operation = self.operation, error = %e, "Failed");
            on_failure(e)
        }
    }
}

/// A repository only has the methods its API tier allows; the rest do not
/// compile.
///
/// ```
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{CreateReadUpdateDeleteApi, Repository};
///
/// fn call(repo: &Repository<CreateReadUpdateDeleteApi<MockDto>, MockDto, MockDto>) {
///     repo.create(MockDto::new("", "Cy"), |_| {}, |_| {});
///     repo.update(MockDto::new("n1", "Cy"), |_| {}, |_| {});
///     repo.delete("n1", |_: bool| {}, |_| {});
///     repo.delete_object(MockDto::new("n1", "Cy"), |_: bool| {}, |_| {});
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{ReadonlyApi, Repository};
///
/// fn call(repo: &Repository<ReadonlyApi<MockDto>, MockDto, MockDto>) {
///     repo.create(MockDto::new("", "Cy"), |_| {}, |_| {});
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{ReadonlyApi, Repository};
///
/// fn call(repo: &Repository<ReadonlyApi<MockDto>, MockDto, MockDto>) {
///     repo.update(MockDto::new("n1", "Cy"), |_| {}, |_| {});
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{ReadonlyApi, Repository};
///
/// fn call(repo: &Repository<ReadonlyApi<MockDto>, MockDto, MockDto>) {
///     repo.delete("n1", |_: bool| {}, |_| {});
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{ReadonlyApi, Repository};
///
/// fn call(repo: &Repository<ReadonlyApi<MockDto>, MockDto, MockDto>) {
///     repo.delete_object(MockDto::new("n1", "Cy"), |_: bool| {}, |_| {});
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{CreateReadApi, Repository};
///
/// fn call(repo: &Repository<CreateReadApi<MockDto>, MockDto, MockDto>) {
///     repo.update(MockDto::new("n1", "Cy"), |_| {}, |_| {});
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{CreateReadApi, Repository};
///
/// fn call(repo: &Repository<CreateReadApi<MockDto>, MockDto, MockDto>) {
///     repo.delete("n1", |_: bool| {}, |_| {});
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{CreateReadApi, Repository};
///
/// fn call(repo: &Repository<CreateReadApi<MockDto>, MockDto, MockDto>) {
///     repo.delete_object(MockDto::new("n1", "Cy"), |_: bool| {}, |_| {});
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{CreateReadUpdateApi, Repository};
///
/// fn call(repo: &Repository<CreateReadUpdateApi<MockDto>, MockDto, MockDto>) {
///     repo.delete("n1", |_: bool| {}, |_| {});
/// }
/// ```
///
/// ```compile_fail
/// use pocket_framework::mock::MockDto;
/// use pocket_framework::{CreateReadUpdateApi, Repository};
///
/// fn call(repo: &Repository<CreateReadUpdateApi<MockDto>, MockDto, MockDto>) {
///     repo.delete_object(MockDto::new("n1", "Cy"), |_: bool| {}, |_| {});
/// }
/// ```
#[cfg(doctest)]
pub struct OutOfTierMethods;
