pub mod claims;
pub mod jwt;
pub mod password;
pub mod permissions;

pub use claims::BackendClaims;
pub use jwt::{mint_access_token, verify_access_token};
pub use permissions::{require, Permission};
