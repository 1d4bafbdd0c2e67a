//! # Pocket Framework
//!
//! Typed REST repositories whose available operations are fixed by a declared
//! **access level**.
//!
//! ## Layers
//!
//! 1. **Contract** ([`Dto`], [`Route`]) - the shape of a remote entity and
//!    the collection it lives in.
//! 2. **API tiers** ([`api`]) - HTTP operations over one collection, split
//!    into `Read ⊂ Create ⊂ Update ⊂ Delete`.
//! 3. **Repository** ([`Repository`]) - runs each operation on a
//!    [`Dispatcher`], maps DTOs to models, reports through callbacks.
//! 4. **Platform** ([`PlatformServices`]) - the injected transport,
//!    dispatcher and UUID generator.
//!
//! ## Static or dynamic tiers
//!
//! When the access level is known at compile time, build a tier type directly
//! and the compiler rejects out-of-tier calls:
//!
//! ```compile_fail
//! use pocket_framework::mock::{MockDto, MockTransport};
//! use pocket_framework::{Endpoint, Mapper, ReadonlyApi, Repository, Tier, TokioDispatcher};
//! use std::sync::Arc;
//!
//! let endpoint = Endpoint::new(Arc::new(MockTransport::new()), "http://localhost/api", "Note")
//!     .unwrap();
//! let api = ReadonlyApi::<MockDto>::from_endpoint(endpoint);
//! let repo = Repository::new(api, Mapper::identity(), Arc::new(TokioDispatcher::current()));
//! repo.create(MockDto::new("", "Cy"), |_| {}, |_| {}); // does not compile
//! ```
//!
//! When it arrives at runtime, [`AppApi::build`] picks the tier and rejects
//! out-of-tier calls with [`ApiError::Unsupported`] before any request is sent.
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockTransport`](mock::MockTransport) and
//! [`CallbackProbe`](mock::CallbackProbe).

pub mod access;
pub mod api;
pub mod dispatcher;
pub mod dto;
pub mod error;
pub mod mock;
pub mod platform;
pub mod repository;
pub mod route;
pub mod tracing;
pub mod transport;

pub use access::{AccessLevel, Operation, ParseAccessLevelError};
pub use api::{
    AppApi, CreateApi, CreateReadApi, CreateReadUpdateApi, CreateReadUpdateDeleteApi, DeleteApi,
    Endpoint, ReadApi, ReadonlyApi, Tier, UpdateApi,
};
pub use dispatcher::{Dispatcher, Task, TokioDispatcher};
pub use dto::{check_shape, Dto};
pub use error::{ApiError, ApiResult};
pub use platform::PlatformServices;
pub use repository::{Mapper, Repository};
pub use route::Route;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
