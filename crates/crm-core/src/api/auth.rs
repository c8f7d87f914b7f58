//! Login and user lookup

use serde::Serialize;

use super::{ApiClient, ApiEvents, ApiError, ApiRequest, Transport};
use crate::domain::{LoginResponse, User};

#[derive(Debug, Serialize)]
pub struct LoginArgs<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<T: Transport, E: ApiEvents> ApiClient<T, E> {
    pub async fn login(&self, args: &LoginArgs<'_>) -> Result<LoginResponse, ApiError> {
        let request = ApiRequest::post("/login").json(args)?;
        self.fetch_json(&request).await
    }

    /// Users of the current tenant (assignment dropdowns, admin filters)
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.fetch_json(&ApiRequest::get("/users/")).await
    }
}
