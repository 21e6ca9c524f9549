//! Authorization policy
//!
//! Pure decision functions over the role model - no I/O, no state. The
//! policy never reports "not found"; whether the target exists is the
//! persistence layer's concern and surfaces later.

use shelf_types::{Identity, Role, UpdateUserInput};

use crate::AuthError;

/// Listing every user record is an admin-only action
pub fn can_list_users(requester: Identity) -> Result<(), AuthError> {
    if requester.role.is_admin() {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Reading a user record: own record, or any record for admins
pub fn can_view_user(requester: Identity, target_id: i64) -> Result<(), AuthError> {
    if requester.role.is_admin() || requester.user_id == target_id {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Updating or deleting a user record: own record, or any record for admins
pub fn can_modify_user(requester: Identity, target_id: i64) -> Result<(), AuthError> {
    if requester.role.is_admin() || requester.user_id == target_id {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Drop a role change from the update unless the requester is an admin
///
/// Non-admins do not get an error for attempting a role change; the field
/// is silently ignored and the rest of the update proceeds.
pub fn scrub_role_change(requester: Identity, input: &mut UpdateUserInput) {
    if !requester.role.is_admin() {
        input.role = None;
    }
}

/// Catalog mutation requires authentication but no particular role;
/// ownership is not tracked per catalog item
pub fn can_mutate_catalog(_requester: Identity) -> Result<(), AuthError> {
    Ok(())
}
