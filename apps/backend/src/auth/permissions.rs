//! Static role -> permission table.

use crate::entities::users::Role;
use crate::error::AppError;
use crate::errors::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    GamesCreate,
    GamesUpdate,
    GamesDelete,
    ReviewsCreate,
    ReviewsUpdateOwn,
    ReviewsDeleteOwn,
    ReviewsDeleteAny,
    ListsManageOwn,
    ActivitiesViewOwn,
    ActivitiesViewAll,
    ActivitiesDelete,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GamesCreate => "games:create",
            Self::GamesUpdate => "games:update",
            Self::GamesDelete => "games:delete",
            Self::ReviewsCreate => "reviews:create",
            Self::ReviewsUpdateOwn => "reviews:update_own",
            Self::ReviewsDeleteOwn => "reviews:delete_own",
            Self::ReviewsDeleteAny => "reviews:delete_any",
            Self::ListsManageOwn => "lists:manage_own",
            Self::ActivitiesViewOwn => "activities:view_own",
            Self::ActivitiesViewAll => "activities:view_all",
            Self::ActivitiesDelete => "activities:delete",
        }
    }
}

const USER_PERMISSIONS: &[Permission] = &[
    Permission::ReviewsCreate,
    Permission::ReviewsUpdateOwn,
    Permission::ReviewsDeleteOwn,
    Permission::ListsManageOwn,
    Permission::ActivitiesViewOwn,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::GamesCreate,
    Permission::GamesUpdate,
    Permission::GamesDelete,
    Permission::ReviewsCreate,
    Permission::ReviewsUpdateOwn,
    Permission::ReviewsDeleteOwn,
    Permission::ReviewsDeleteAny,
    Permission::ListsManageOwn,
    Permission::ActivitiesViewOwn,
    Permission::ActivitiesViewAll,
    Permission::ActivitiesDelete,
];

pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::User => USER_PERMISSIONS,
        Role::Admin => ADMIN_PERMISSIONS,
    }
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// 403 `INSUFFICIENT_ROLE` unless `role` grants `permission`.
pub fn require(role: Role, permission: Permission) -> Result<(), AppError> {
    if has_permission(role, permission) {
        Ok(())
    } else {
        Err(AppError::forbidden(
            ErrorCode::InsufficientRole,
            format!("Missing permission {}", permission.as_str()),
        ))
    }
}
