//! # Factory
//!
//! [`PocketFactory`] wires the host's [`ApplicationData`] and
//! [`PlatformServices`] into ready-to-use repositories. It is the only place
//! that knows which route a repository talks to; the access level is chosen
//! per call.
//!
//! ```rust,ignore
//! let factory = PocketFactory::new(app, user, PlatformServices::native(handle, None)?);
//!
//! // Level known at runtime: out-of-tier calls fail with `Unsupported`.
//! let repo = factory.get_sample_repo(AccessLevel::Read)?;
//!
//! // Level known at compile time: out-of-tier calls do not compile.
//! let repo = factory.typed_sample_repo::<ReadonlyApi<SampleUserDto>>()?;
//! ```

use crate::model::{ApplicationData, SampleUserDto, UserData};
use crate::repository::SampleRepository;
use crate::route::SampleRoute;
use pocket_framework::{
    AccessLevel, ApiError, AppApi, Endpoint, Mapper, PlatformServices, Repository, Tier,
};
use tracing::info;

/// Builds sample repositories for one application and user.
#[derive(Debug, Clone)]
pub struct PocketFactory {
    application: ApplicationData,
    user: UserData,
    platform: PlatformServices,
}

impl PocketFactory {
    pub fn new(application: ApplicationData, user: UserData, platform: PlatformServices) -> Self {
        Self {
            application,
            user,
            platform,
        }
    }

    /// Repository over the `User` collection at `level`.
    ///
    /// Fails only when `api_host` is not a usable base URL.
    pub fn get_sample_repo(&self, level: AccessLevel) -> Result<SampleRepository, ApiError> {
        info!(
            application = %self.application.name,
            user_id = %self.user.id,
            %level,
            "Building sample repository"
        );
        let api = AppApi::build(
            self.platform.transport(),
            &self.application.api_host,
            &SampleRoute::User,
            level,
        )?;
        Ok(Repository::new(
            api,
            Mapper::identity(),
            self.platform.dispatcher(),
        ))
    }

    /// Repository whose tier is fixed by the type `A`.
    pub fn typed_sample_repo<A>(
        &self,
    ) -> Result<Repository<A, SampleUserDto, SampleUserDto>, ApiError>
    where
        A: Tier<SampleUserDto>,
    {
        let endpoint = Endpoint::new(
            self.platform.transport(),
            &self.application.api_host,
            &SampleRoute::User,
        )?;
        info!(url = %endpoint.url(), level = %A::LEVEL, "Building typed sample repository");
        Ok(Repository::new(
            A::from_endpoint(endpoint),
            Mapper::identity(),
            self.platform.dispatcher(),
        ))
    }

    pub fn application(&self) -> &ApplicationData {
        &self.application
    }

    pub fn user(&self) -> &UserData {
        &self.user
    }

    pub fn platform(&self) -> &PlatformServices {
        &self.platform
    }
}
