//! Checks applied to edits before they touch the document.
use std::collections::HashSet;

use serde_json::Value;

use crate::auth::role::Role;
use crate::error::ValidationError;
use crate::mutation::types::{CategoryInput, NewUser, ProductInput};

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

/// A full document replacement must at least be a JSON object.
pub fn require_object(payload: &Value) -> Result<(), ValidationError> {
    if payload.is_object() {
        Ok(())
    } else {
        Err(ValidationError::NotAnObject)
    }
}

pub fn validate_new_user(input: &NewUser) -> Result<Role, ValidationError> {
    required("username", &input.username)?;
    required("password", &input.password)?;
    input
        .role
        .parse::<Role>()
        .map_err(|_| ValidationError::UnknownRole(input.role.clone()))
}

pub fn validate_category(input: &CategoryInput) -> Result<(), ValidationError> {
    required("id", &input.id)?;
    if input.name.is_blank() {
        return Err(ValidationError::Required { field: "name" });
    }
    Ok(())
}

pub fn validate_product(input: &ProductInput) -> Result<(), ValidationError> {
    required("categoryId", &input.category_id)?;
    if input.name.is_blank() {
        return Err(ValidationError::Required { field: "name" });
    }
    if !input.price.is_finite() || input.price < 0.0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}

/// `requested` must name each of `existing` exactly once.
pub fn validate_reorder<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    requested: &[String],
) -> Result<(), ValidationError> {
    let existing: HashSet<&str> = existing.into_iter().collect();
    let mut seen = HashSet::with_capacity(requested.len());
    let complete = requested.len() == existing.len()
        && requested
            .iter()
            .all(|id| existing.contains(id.as_str()) && seen.insert(id.as_str()));
    if complete {
        Ok(())
    } else {
        Err(ValidationError::ReorderMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::localized::LocalizedText;
    use serde_json::json;

    fn product(price: f64) -> ProductInput {
        serde_json::from_value(json!({
            "categoryId": "food",
            "price": 1.0,
            "name": {"tr": "Kebap", "en": "Kebab"}
        }))
        .map(|p: ProductInput| ProductInput { price, ..p })
        .unwrap()
    }

    #[test]
    fn object_payloads_only() {
        assert!(require_object(&json!({})).is_ok());
        assert_eq!(require_object(&json!([])), Err(ValidationError::NotAnObject));
        assert_eq!(require_object(&json!("x")), Err(ValidationError::NotAnObject));
    }

    #[test]
    fn new_user_checks() {
        let mut input = NewUser {
            username: "chef".into(),
            password: "secret".into(),
            role: "designer".into(),
            name: "Chef".into(),
        };
        assert_eq!(validate_new_user(&input), Ok(Role::Designer));

        input.role = "owner".into();
        assert_eq!(
            validate_new_user(&input),
            Err(ValidationError::UnknownRole("owner".into()))
        );

        input.username = "  ".into();
        assert_eq!(
            validate_new_user(&input),
            Err(ValidationError::Required { field: "username" })
        );
    }

    #[test]
    fn category_needs_id_and_name() {
        let mut input = CategoryInput {
            id: "soup".into(),
            icon: "🍲".into(),
            name: LocalizedText::new("Çorba", "Soup"),
        };
        assert!(validate_category(&input).is_ok());
        input.name = LocalizedText::default();
        assert_eq!(
            validate_category(&input),
            Err(ValidationError::Required { field: "name" })
        );
    }

    #[test]
    fn product_price_must_be_sane() {
        assert!(validate_product(&product(0.0)).is_ok());
        assert_eq!(
            validate_product(&product(-1.0)),
            Err(ValidationError::InvalidPrice)
        );
        assert_eq!(
            validate_product(&product(f64::NAN)),
            Err(ValidationError::InvalidPrice)
        );
    }

    #[test]
    fn reorder_must_be_a_permutation() {
        let existing = ["a", "b", "c"];
        let ids = |v: &[&str]| v.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        assert!(validate_reorder(existing, &ids(&["c", "a", "b"])).is_ok());
        assert!(validate_reorder(existing, &ids(&["a", "b"])).is_err());
        assert!(validate_reorder(existing, &ids(&["a", "a", "b"])).is_err());
        assert!(validate_reorder(existing, &ids(&["a", "b", "z"])).is_err());
    }
}
