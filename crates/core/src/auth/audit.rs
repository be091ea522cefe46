use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::document::id::log_entry_id;
use crate::document::model::{LogEntry, User};

/// Entries beyond this many are dropped, oldest first.
pub const MAX_LOG_ENTRIES: usize = 1000;

/// Tags written to `LogEntry::action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Login,
    Logout,
    SecurityAlert,
    CreateUser,
    DeleteUser,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
    ReorderCategories,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    ReorderProducts,
    UpdateSettings,
    ReplaceDocument,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Login => "login",
            AuditAction::Logout => "logout",
            AuditAction::SecurityAlert => "security_alert",
            AuditAction::CreateUser => "create_user",
            AuditAction::DeleteUser => "delete_user",
            AuditAction::CreateCategory => "create_category",
            AuditAction::UpdateCategory => "update_category",
            AuditAction::DeleteCategory => "delete_category",
            AuditAction::ReorderCategories => "reorder_categories",
            AuditAction::CreateProduct => "create_product",
            AuditAction::UpdateProduct => "update_product",
            AuditAction::DeleteProduct => "delete_product",
            AuditAction::ReorderProducts => "reorder_products",
            AuditAction::UpdateSettings => "update_settings",
            AuditAction::ReplaceDocument => "replace_document",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prepend an entry for `actor` and cap the list at [`MAX_LOG_ENTRIES`].
pub fn append(logs: &mut Vec<LogEntry>, actor: &User, action: AuditAction, detail: String) {
    append_at(logs, actor, action, detail, Utc::now());
}

pub(crate) fn append_at(
    logs: &mut Vec<LogEntry>,
    actor: &User,
    action: AuditAction,
    detail: String,
    now: DateTime<Utc>,
) {
    tracing::info!(
        username = %actor.username,
        role = %actor.role,
        action = %action,
        detail = %detail,
        "audit"
    );
    logs.insert(
        0,
        LogEntry {
            id: log_entry_id(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            username: actor.username.clone(),
            role: actor.role.clone(),
            action: action.as_str().to_string(),
            detail,
            extra: Default::default(),
        },
    );
    logs.truncate(MAX_LOG_ENTRIES);
}
