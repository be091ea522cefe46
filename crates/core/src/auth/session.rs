use tracing::{debug, warn};

use super::audit::{self, AuditAction};
use super::role::{self, Capability, Role};
use crate::document::model::{Document, User};
use crate::error::AuthError;

/// Who is acting on the document for the duration of one request.
///
/// `Anonymous` until [`Session::authenticate`] succeeds; [`Session::logout`]
/// returns to `Anonymous`. Only an authenticated session can pass
/// [`Session::require`] or write audit entries.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Resume a session for a user already verified elsewhere (e.g. by a
    /// signed token).
    pub fn for_user(user: User) -> Self {
        Self {
            current_user: Some(user),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Exact username and password match against the document's users.
    /// A failed attempt leaves the session as it was and is not logged.
    pub fn authenticate(
        &mut self,
        doc: &mut Document,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let Some(user) = doc
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
        else {
            debug!(username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        self.current_user = Some(user.clone());
        self.log_action(doc, AuditAction::Login, "User logged in");
        Ok(user)
    }

    pub fn logout(&mut self, doc: &mut Document) {
        if self.current_user.is_some() {
            self.log_action(doc, AuditAction::Logout, "User logged out");
        }
        self.current_user = None;
    }

    pub fn has_permission(&self, capability: Capability) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|u| role::has_permission(&u.role, capability))
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|u| u.role == role.as_str())
    }

    /// The acting user, provided they hold `capability`.
    pub fn require(&self, capability: Capability) -> Result<&User, AuthError> {
        let user = self
            .current_user
            .as_ref()
            .ok_or(AuthError::NotAuthenticated)?;
        if role::has_permission(&user.role, capability) {
            Ok(user)
        } else {
            Err(AuthError::Forbidden(capability))
        }
    }

    /// Whether the named admin view may be opened. A denial is recorded as a
    /// `security_alert` when someone is signed in.
    pub fn check_view_access(&self, doc: &mut Document, view: &str) -> bool {
        let Some(capability) = role::required_capability(view) else {
            return true;
        };
        if self.has_permission(capability) {
            return true;
        }
        warn!(view, %capability, "view access denied");
        self.log_action(
            doc,
            AuditAction::SecurityAlert,
            format!("Unauthorized access attempt: {view}"),
        );
        false
    }

    /// Record an action by the current user. Does nothing when anonymous.
    ///
    /// The username and role are taken from the user's current record in
    /// `doc`, so a renamed or re-roled account is logged as it is now.
    pub fn log_action(&self, doc: &mut Document, action: AuditAction, detail: impl Into<String>) {
        let Some(user) = self.current_user.as_ref() else {
            return;
        };
        let actor = doc.find_user(&user.id).cloned().unwrap_or_else(|| user.clone());
        audit::append(&mut doc.logs, &actor, action, detail.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::normalize;
    use serde_json::json;

    fn bootstrap_doc() -> Document {
        normalize(&json!({}))
    }

    fn signed_in(doc: &mut Document, username: &str, password: &str) -> Session {
        let mut session = Session::anonymous();
        session.authenticate(doc, username, password).unwrap();
        session
    }

    #[test]
    fn bootstrap_admin_logs_in_as_developer() {
        let mut doc = bootstrap_doc();
        let mut session = Session::anonymous();

        let user = session.authenticate(&mut doc, "admin", "admin").unwrap();

        assert_eq!(user.role, "developer");
        assert!(session.has_role(Role::Developer));
        assert_eq!(doc.logs.len(), 1);
        assert_eq!(doc.logs[0].action, "login");
        assert_eq!(doc.logs[0].username, "admin");
    }

    #[test]
    fn wrong_password_is_rejected_without_log() {
        let mut doc = bootstrap_doc();
        let mut session = Session::anonymous();

        let err = session.authenticate(&mut doc, "admin", "wrong").unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!session.is_authenticated());
        assert!(doc.logs.is_empty());
    }

    #[test]
    fn username_match_is_exact() {
        let mut doc = bootstrap_doc();
        let mut session = Session::anonymous();
        assert!(session.authenticate(&mut doc, "Admin", "admin").is_err());
        assert!(session.authenticate(&mut doc, "admin ", "admin").is_err());
    }

    #[test]
    fn admin_denied_users_view_logs_one_alert() {
        let mut doc = bootstrap_doc();
        doc.users[1].role = "admin".to_string();
        let session = signed_in(&mut doc, "admin", "admin");
        let before = doc.logs.len();

        assert!(!session.check_view_access(&mut doc, "users"));

        assert_eq!(doc.logs.len(), before + 1);
        assert_eq!(doc.logs[0].action, "security_alert");
        assert_eq!(doc.logs[0].role, "admin");
    }

    #[test]
    fn open_view_logs_nothing() {
        let mut doc = bootstrap_doc();
        doc.users[1].role = "admin".to_string();
        let session = signed_in(&mut doc, "admin", "admin");
        let before = doc.logs.len();

        assert!(session.check_view_access(&mut doc, "products"));
        assert!(session.check_view_access(&mut doc, "settings"));

        assert_eq!(doc.logs.len(), before);
    }

    #[test]
    fn anonymous_is_denied_gated_views_silently() {
        let mut doc = bootstrap_doc();
        let session = Session::anonymous();

        assert!(!session.check_view_access(&mut doc, "logs"));
        assert!(session.check_view_access(&mut doc, "dashboard"));
        assert!(doc.logs.is_empty());
    }

    #[test]
    fn anonymous_log_action_is_noop() {
        let mut doc = bootstrap_doc();
        Session::anonymous().log_action(&mut doc, AuditAction::UpdateSettings, "x");
        assert!(doc.logs.is_empty());
    }

    #[test]
    fn logout_records_and_clears() {
        let mut doc = bootstrap_doc();
        let mut session = signed_in(&mut doc, "designer", "designer");

        session.logout(&mut doc);
        session.logout(&mut doc);

        assert!(!session.is_authenticated());
        let actions: Vec<&str> = doc.logs.iter().map(|l| l.action.as_str()).collect();
        assert_eq!(actions, ["logout", "login"]);
    }

    #[test]
    fn require_distinguishes_anonymous_and_forbidden() {
        let mut doc = bootstrap_doc();
        assert_eq!(
            Session::anonymous()
                .require(Capability::ManageProducts)
                .unwrap_err(),
            AuthError::NotAuthenticated
        );

        let designer = signed_in(&mut doc, "designer", "designer");
        assert!(designer.require(Capability::ManageProducts).is_ok());
        assert_eq!(
            designer.require(Capability::ManageSettings).unwrap_err(),
            AuthError::Forbidden(Capability::ManageSettings)
        );
    }

    #[test]
    fn accounts_stored_without_ids_are_logged_as_themselves() {
        let mut doc = normalize(&json!({
            "users": [
                {"username": "a", "password": "pa", "role": "designer"},
                {"username": "b", "password": "pb", "role": "developer"}
            ]
        }));

        let session = signed_in(&mut doc, "b", "pb");
        session.log_action(&mut doc, AuditAction::UpdateSettings, "edited");

        for entry in &doc.logs[..2] {
            assert_eq!(entry.username, "b");
            assert_eq!(entry.role, "developer");
        }
    }

    #[test]
    fn log_uses_current_record_of_actor() {
        let mut doc = bootstrap_doc();
        let session = signed_in(&mut doc, "designer", "designer");
        doc.users[2].role = "admin".to_string();

        session.log_action(&mut doc, AuditAction::UpdateProduct, "edited");

        assert_eq!(doc.logs[0].role, "admin");
    }
}
