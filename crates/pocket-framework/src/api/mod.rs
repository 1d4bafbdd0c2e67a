//! Capability-tiered REST clients.
//!
//! - [`Endpoint`] - shared request logic for one resource collection
//! - [`ReadApi`], [`CreateApi`], [`UpdateApi`], [`DeleteApi`] - the tier traits
//! - [`ReadonlyApi`] .. [`CreateReadUpdateDeleteApi`] - statically tiered types
//! - [`AppApi`] - tier selected from a runtime [`AccessLevel`](crate::AccessLevel)

pub mod app;
pub mod endpoint;
pub mod tiers;

pub use app::AppApi;
pub use endpoint::Endpoint;
pub use tiers::{
    CreateApi, CreateReadApi, CreateReadUpdateApi, CreateReadUpdateDeleteApi, DeleteApi, ReadApi,
    ReadonlyApi, Tier, UpdateApi,
};
