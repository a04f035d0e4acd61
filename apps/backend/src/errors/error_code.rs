//! Error codes for the GameShelf API.
//!
//! Every `code` that appears in a Problem Details body is a variant here;
//! handlers and services never pass ad-hoc strings.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Email/password pair did not match
    InvalidCredentials,
    /// Access denied
    Forbidden,
    /// Token subject no longer exists
    ForbiddenUserNotFound,
    /// Caller's role lacks the permission for this route
    InsufficientRole,
    /// Caller does not own the review
    NotReviewOwner,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Platform outside the supported set
    InvalidPlatform,
    /// Review already exists for this user and game
    DuplicateReview,
    /// Game with same title and platform exists
    DuplicateGame,
    /// Email already registered
    DuplicateEmail,
    /// Username already taken
    DuplicateUsername,
    /// Game already present in one of the user's lists
    AlreadyInList,

    // Resource Not Found
    GameNotFound,
    ReviewNotFound,
    UserNotFound,
    ActivityNotFound,
    /// Game is not in the user's wishlist/played list
    ListEntryNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Concurrent writers kept colliding after bounded retries
    StorageConflict,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE string, exactly as it appears in responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
            Self::NotReviewOwner => "NOT_REVIEW_OWNER",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidPlatform => "INVALID_PLATFORM",
            Self::DuplicateReview => "DUPLICATE_REVIEW",
            Self::DuplicateGame => "DUPLICATE_GAME",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::AlreadyInList => "ALREADY_IN_LIST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::ReviewNotFound => "REVIEW_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ActivityNotFound => "ACTIVITY_NOT_FOUND",
            Self::ListEntryNotFound => "LIST_ENTRY_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::StorageConflict => "STORAGE_CONFLICT",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
