pub mod host;
pub mod user;

pub use host::{ApplicationData, UserData};
pub use user::SampleUserDto;
