use chrono::Utc;
use serde_json::Map;

use super::types::NewUser;
use crate::auth::audit::AuditAction;
use crate::auth::role::Capability;
use crate::auth::session::Session;
use crate::document::id::{self, IdKind};
use crate::document::model::{Document, LogEntry, User};
use crate::document::seed::BOOTSTRAP_DEVELOPER;
use crate::document::validate::validate_new_user;
use crate::error::{AuthError, OperationError, ValidationError};

pub fn list_users<'a>(session: &Session, doc: &'a Document) -> Result<&'a [User], AuthError> {
    session.require(Capability::ManageUsers)?;
    Ok(&doc.users)
}

pub fn list_logs<'a>(session: &Session, doc: &'a Document) -> Result<&'a [LogEntry], AuthError> {
    session.require(Capability::ViewLogs)?;
    Ok(&doc.logs)
}

pub fn add_user(
    session: &Session,
    doc: &mut Document,
    input: NewUser,
) -> Result<User, OperationError> {
    session.require(Capability::ManageUsers)?;
    let role = validate_new_user(&input)?;
    if doc.users.iter().any(|u| u.username == input.username) {
        return Err(ValidationError::DuplicateUsername(input.username).into());
    }

    let user = User {
        id: id::generate(IdKind::User, Utc::now(), |candidate| {
            doc.find_user(candidate).is_some()
        }),
        username: input.username,
        password: input.password,
        role: role.as_str().to_string(),
        name: input.name,
        extra: Map::new(),
    };
    doc.users.push(user.clone());
    session.log_action(
        doc,
        AuditAction::CreateUser,
        format!("User added: {} ({})", user.username, user.role),
    );
    Ok(user)
}

/// Remove an account. The bootstrap developer account is refused.
pub fn delete_user(
    session: &Session,
    doc: &mut Document,
    user_id: &str,
) -> Result<User, OperationError> {
    session.require(Capability::ManageUsers)?;
    let index = doc
        .users
        .iter()
        .position(|u| u.id == user_id)
        .ok_or_else(|| OperationError::not_found("user", user_id))?;
    if doc.users[index].username == BOOTSTRAP_DEVELOPER {
        return Err(AuthError::ProtectedAccount(BOOTSTRAP_DEVELOPER.to_string()).into());
    }

    let removed = doc.users.remove(index);
    session.log_action(
        doc,
        AuditAction::DeleteUser,
        format!("User deleted: {}", removed.username),
    );
    Ok(removed)
}
