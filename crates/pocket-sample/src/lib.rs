//! # Pocket Sample
//!
//! A worked example on top of [`pocket_framework`]: one `User` collection,
//! exposed through a [`PocketFactory`] that picks the API tier from an
//! [`AccessLevel`](pocket_framework::AccessLevel).
//!
//! - **[model]**: the wire DTO ([`SampleUserDto`]) and the host descriptors
//!   ([`ApplicationData`], [`UserData`]).
//! - **[route]**: the remote collections this sample talks to.
//! - **[repository]**: the [`SampleRepository`] alias.
//! - **[factory]**: wiring of platform services, route and level.
//! - **[settings]**: file and environment configuration for the demo binary.

pub mod factory;
pub mod model;
pub mod repository;
pub mod route;
pub mod settings;

pub use factory::PocketFactory;
pub use model::{ApplicationData, SampleUserDto, UserData};
pub use repository::SampleRepository;
pub use route::SampleRoute;
pub use settings::{PocketSettings, SettingsError};
