//! Whole-document replacement by a signed-in user.
use crate::auth::audit::AuditAction;
use crate::auth::role::Capability;
use crate::auth::session::Session;
use crate::document::model::Document;
use crate::error::AuthError;

/// Replace every section of `doc` with `replacement`.
///
/// A full replace can rewrite accounts, settings and the catalog at once, so
/// the session must hold every capability. The audit log is kept as it is:
/// entries in `replacement.logs` are ignored and the replace itself is
/// recorded on top.
pub fn replace_document(
    session: &Session,
    doc: &mut Document,
    replacement: Document,
) -> Result<(), AuthError> {
    for capability in Capability::ALL {
        session.require(capability)?;
    }
    let logs = std::mem::take(&mut doc.logs);
    *doc = Document {
        logs,
        ..replacement
    };
    session.log_action(doc, AuditAction::ReplaceDocument, "Document replaced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::normalize;
    use serde_json::json;

    fn signed_in(doc: &mut Document, username: &str, password: &str) -> Session {
        let mut session = Session::anonymous();
        session.authenticate(doc, username, password).unwrap();
        session
    }

    #[test]
    fn developer_replaces_everything_but_the_log() {
        let mut doc = normalize(&json!({}));
        let session = signed_in(&mut doc, "developer", "w3hwe7k4r4-");
        let replacement = normalize(&json!({
            "settings": {"currency": "EUR"},
            "logs": []
        }));

        replace_document(&session, &mut doc, replacement).unwrap();

        assert_eq!(doc.settings.currency, "EUR");
        let actions: Vec<&str> = doc.logs.iter().map(|l| l.action.as_str()).collect();
        assert_eq!(actions, ["replace_document", "login"]);
        assert_eq!(doc.logs[0].username, "developer");
    }

    #[test]
    fn designer_cannot_promote_themselves() {
        let mut doc = normalize(&json!({}));
        let session = signed_in(&mut doc, "designer", "designer");
        let before = doc.clone();
        let mut replacement = doc.clone();
        replacement.users[2].role = "developer".to_string();
        replacement.logs.clear();

        let err = replace_document(&session, &mut doc, replacement).unwrap_err();

        assert_eq!(err, AuthError::Forbidden(Capability::ManageUsers));
        assert_eq!(doc, before);
    }

    #[test]
    fn admin_role_is_not_enough() {
        let mut doc = normalize(&json!({}));
        doc.users[1].role = "admin".to_string();
        let session = signed_in(&mut doc, "admin", "admin");
        let replacement = normalize(&json!({"settings": {"currency": "EUR"}}));

        let err = replace_document(&session, &mut doc, replacement).unwrap_err();

        assert_eq!(err, AuthError::Forbidden(Capability::ManageUsers));
        assert_eq!(doc.settings.currency, "TL");
    }
}
