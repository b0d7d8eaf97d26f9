use axum_helpers::SessionUser;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};

/// Allow admins and the owner of the resource; forbid everyone else.
pub fn check_permissions(requester: &SessionUser, owner: Uuid) -> OrderResult<()> {
    if requester.is_admin() || requester.user_id == owner {
        return Ok(());
    }

    tracing::info!(user_id = %requester.user_id, owner = %owner, "Access to resource denied");
    Err(OrderError::Forbidden)
}
