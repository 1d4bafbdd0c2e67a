#![allow(dead_code)]

use pocket_framework::mock::MockTransport;
use pocket_framework::{Dto, Endpoint, Tier};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const BASE_API_URL: &str = "http://localhost:8080/api/v2";
pub const USER_URL: &str = "http://localhost:8080/api/v2/User";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub created_date_time: i64,
    pub created_by_user_id: String,
    pub last_modified_date_time: Option<i64>,
    pub last_modified_by_user_id: Option<String>,
}

impl Dto for UserDto {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn created_date_time(&self) -> i64 {
        self.created_date_time
    }
    fn created_by_user_id(&self) -> &str {
        &self.created_by_user_id
    }
    fn last_modified_date_time(&self) -> Option<i64> {
        self.last_modified_date_time
    }
    fn last_modified_by_user_id(&self) -> Option<&str> {
        self.last_modified_by_user_id.as_deref()
    }
}

pub fn user(id: &str, name: &str) -> UserDto {
    UserDto {
        id: id.to_string(),
        name: name.to_string(),
        created_date_time: 1000,
        created_by_user_id: "sys".to_string(),
        last_modified_date_time: None,
        last_modified_by_user_id: None,
    }
}

pub fn modified(dto: &UserDto, at: i64, by: &str) -> UserDto {
    UserDto {
        last_modified_date_time: Some(at),
        last_modified_by_user_id: Some(by.to_string()),
        ..dto.clone()
    }
}

pub fn endpoint(mock: &MockTransport) -> Endpoint<UserDto> {
    Endpoint::new(Arc::new(mock.clone()), BASE_API_URL, "User").unwrap()
}

pub fn tier<A: Tier<UserDto>>(mock: &MockTransport) -> A {
    A::from_endpoint(endpoint(mock))
}
