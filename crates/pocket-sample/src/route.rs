use pocket_framework::Route;

/// Collections exposed by the sample backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRoute {
    User,
}

impl Route for SampleRoute {
    fn path(&self) -> &str {
        match self {
            SampleRoute::User => "User",
        }
    }
}
