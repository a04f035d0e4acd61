//! DTOs for users_sea adapter.

use crate::entities::users::Role;

/// DTO for creating a new user. Fields arrive already normalized and hashed.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub country: String,
    pub role: Role,
}

impl UserCreate {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            country: country.into(),
            role: Role::User,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
