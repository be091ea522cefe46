//! Identifier generation for records created through the admin panel.
//!
//! Conventions kept from existing data files:
//! - Users: `u_{millis}`
//! - Products: `{millis}`
//! - Log entries: time-ordered UUID
//!
//! Category ids are chosen by the editor and only validated.
use chrono::{DateTime, Utc};
use uuid::Uuid;

const USER_PREFIX: &str = "u_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    User,
    Product,
}

impl IdKind {
    fn prefix(self) -> &'static str {
        match self {
            IdKind::User => USER_PREFIX,
            IdKind::Product => "",
        }
    }
}

/// Build a millisecond-based id, stepping forward until `taken` reports the
/// candidate as free.
pub fn generate(kind: IdKind, now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = format!("{}{millis}", kind.prefix());
        if !taken(&candidate) {
            return candidate;
        }
        millis += 1;
    }
}

pub fn log_entry_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn user_ids_are_prefixed() {
        let id = generate(IdKind::User, at(1_766_526_505_342), |_| false);
        assert_eq!(id, "u_1766526505342");
    }

    #[test]
    fn product_ids_are_bare_millis() {
        let id = generate(IdKind::Product, at(42), |_| false);
        assert_eq!(id, "42");
    }

    #[test]
    fn collisions_step_forward() {
        let id = generate(IdKind::Product, at(100), |c| c == "100" || c == "101");
        assert_eq!(id, "102");
    }

    #[test]
    fn log_ids_are_unique() {
        assert_ne!(log_entry_id(), log_entry_id());
    }
}
