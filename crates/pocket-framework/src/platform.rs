//! Platform-provided collaborators, passed in explicitly.

use crate::dispatcher::{Dispatcher, TokioDispatcher};
use crate::error::ApiResult;
use crate::transport::{ReqwestTransport, Transport};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Transport, dispatcher and UUID generator for the running platform.
///
/// Construct one per application and hand it to whatever builds repositories.
/// Cloning is cheap; every collaborator is shared behind an `Arc`.
#[derive(Clone)]
pub struct PlatformServices {
    platform: String,
    transport: Arc<dyn Transport>,
    dispatcher: Arc<dyn Dispatcher>,
    uuid: Arc<dyn Fn() -> String + Send + Sync>,
}

impl PlatformServices {
    pub fn new(
        platform: impl Into<String>,
        transport: Arc<dyn Transport>,
        dispatcher: Arc<dyn Dispatcher>,
        uuid: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            platform: platform.into(),
            transport,
            dispatcher,
            uuid: Arc::new(uuid),
        }
    }

    /// reqwest transport, Tokio dispatcher on `handle`, random v4 UUIDs.
    pub fn native(handle: Handle, request_timeout: Option<Duration>) -> ApiResult<Self> {
        let transport = match request_timeout {
            Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
            None => ReqwestTransport::default(),
        };
        Ok(Self::new(
            format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            Arc::new(transport),
            Arc::new(TokioDispatcher::new(handle)),
            || uuid::Uuid::new_v4().to_string(),
        ))
    }

    /// Human readable platform description, e.g. `"linux x86_64"`.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub fn dispatcher(&self) -> Arc<dyn Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn new_uuid(&self) -> String {
        (self.uuid)()
    }
}

impl fmt::Debug for PlatformServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformServices")
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}
