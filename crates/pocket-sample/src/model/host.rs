use serde::{Deserialize, Serialize};

/// Describes the running application and where its backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationData {
    pub id: String,
    pub name: String,
    pub launch_id: String,
    /// Base API URL, e.g. `https://pocket.example.com/api/v2`.
    pub api_host: String,
}

/// The signed-in user of the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub session_id: String,
}
