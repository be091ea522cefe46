//! Every shape a stored document has been seen in, as one permissive type.
//!
//! All fields are optional. A field holding the wrong JSON type decodes as
//! absent rather than failing the whole document, and a malformed element of
//! a list is skipped. Unknown keys are collected into `extra` maps.
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::document::localized::{Language, LocalizedText};
use crate::document::model::{DietaryTags, Palette, Status};

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            warn!(error = %err, "ignoring malformed field");
            Ok(None)
        }
    }
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(None),
        other => {
            warn!(found = %json_kind(&other), "expected a list, ignoring field");
            return Ok(None);
        }
    };
    let parsed = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!(index, error = %err, "skipping malformed list element");
                None
            }
        })
        .collect();
    Ok(Some(parsed))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Localized text, or the plain string older documents stored instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LegacyText {
    Localized(LocalizedText),
    Plain(String),
}

impl LegacyText {
    pub fn into_localized(self) -> LocalizedText {
        match self {
            LegacyText::Localized(text) => text,
            LegacyText::Plain(s) => LocalizedText::uniform(s),
        }
    }
}

/// Ids were sometimes written as JSON numbers. Log timestamps use the same
/// shape, epoch milliseconds or text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LegacyId {
    Text(String),
    Number(Number),
}

impl LegacyId {
    pub fn into_string(self) -> String {
        match self {
            LegacyId::Text(s) => s,
            LegacyId::Number(n) => n.to_string(),
        }
    }
}

/// Prices entered through a text field may have been saved as strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LegacyNumber {
    Number(f64),
    Text(String),
}

impl LegacyNumber {
    /// Finite value, or zero when the stored value cannot be read as one.
    pub fn into_f64(self) -> f64 {
        let value = match self {
            LegacyNumber::Number(n) => n,
            LegacyNumber::Text(s) => s.trim().replace(',', ".").parse().unwrap_or(f64::NAN),
        };
        if value.is_finite() {
            value
        } else {
            warn!("unreadable number, using 0");
            0.0
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDocument {
    #[serde(default, deserialize_with = "lenient_list")]
    pub users: Option<Vec<LegacyUser>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub logs: Option<Vec<LegacyLogEntry>>,
    #[serde(default, deserialize_with = "lenient")]
    pub settings: Option<LegacySettings>,
    #[serde(default, deserialize_with = "lenient")]
    pub theme: Option<LegacyTheme>,
    #[serde(default, deserialize_with = "lenient")]
    pub translations: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub categories: Option<Vec<LegacyCategory>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub products: Option<Vec<LegacyProduct>>,
    #[serde(default, deserialize_with = "lenient")]
    pub sections: Option<LegacySections>,
    #[serde(default, deserialize_with = "lenient")]
    pub hero: Option<LegacyHero>,
    #[serde(default, deserialize_with = "lenient")]
    pub footer: Option<LegacyFooter>,
    #[serde(default, deserialize_with = "lenient")]
    pub company: Option<LegacyCompany>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyUser {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<LegacyId>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An audit entry as older clients wrote it: numeric ids, free-form
/// timestamps and missing fields all occur.
#[derive(Debug, Default, Deserialize)]
pub struct LegacyLogEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<LegacyId>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<LegacyId>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySettings {
    #[serde(default, deserialize_with = "lenient")]
    pub site_title: Option<LegacyText>,
    #[serde(default, deserialize_with = "lenient")]
    pub default_language: Option<Language>,
    #[serde(default, deserialize_with = "lenient")]
    pub default_theme: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub theme_toggle_allowed: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub google_analytics_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyTheme {
    #[serde(default, deserialize_with = "lenient")]
    pub light: Option<Palette>,
    #[serde(default, deserialize_with = "lenient")]
    pub dark: Option<Palette>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyCategory {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<LegacyId>,
    #[serde(default, deserialize_with = "lenient")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<LegacyText>,
    #[serde(default, deserialize_with = "lenient")]
    pub order: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Dietary flags; flags missing from a stored object read as `false`.
#[derive(Debug, Default, Deserialize)]
pub struct LegacyTags {
    #[serde(default, deserialize_with = "lenient")]
    pub gluten: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub dairy: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub spicy: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub vegan: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub vegetarian: Option<bool>,
}

impl LegacyTags {
    pub fn into_tags(self) -> DietaryTags {
        DietaryTags {
            gluten: self.gluten.unwrap_or(false),
            dairy: self.dairy.unwrap_or(false),
            spicy: self.spicy.unwrap_or(false),
            vegan: self.vegan.unwrap_or(false),
            vegetarian: self.vegetarian.unwrap_or(false),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProduct {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<LegacyId>,
    #[serde(default, deserialize_with = "lenient")]
    pub category_id: Option<LegacyId>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<LegacyNumber>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<LegacyText>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<LegacyText>,
    #[serde(default, deserialize_with = "lenient")]
    pub long_description: Option<LegacyText>,
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<LegacyTags>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "lenient")]
    pub order: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacySections {
    #[serde(default, deserialize_with = "lenient")]
    pub header: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub hero: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub menu: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyHero {
    #[serde(default, deserialize_with = "lenient")]
    pub background_image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<LegacyText>,
    #[serde(default, deserialize_with = "lenient")]
    pub subtitle: Option<LegacyText>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<Status>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Footer social links: a list today, a fixed `{instagram, facebook}`
/// object in older documents.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LegacySocials {
    List(Vec<Value>),
    Fixed(LegacySocialMap),
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacySocialMap {
    #[serde(default, deserialize_with = "lenient")]
    pub instagram: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub facebook: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySocialLink {
    #[serde(default, deserialize_with = "lenient")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFooter {
    #[serde(default, deserialize_with = "lenient")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub brand_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub socials: Option<LegacySocials>,
    #[serde(default, deserialize_with = "lenient")]
    pub review_link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub copyright: Option<LegacyText>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCompany {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<LegacyText>,
    #[serde(default, deserialize_with = "lenient")]
    pub logo_text: Option<LegacyText>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decode one translation value, accepting the plain-string shape.
pub fn translation_entry(value: Value) -> Option<LocalizedText> {
    match serde_json::from_value::<LegacyText>(value) {
        Ok(text) => Some(text.into_localized()),
        Err(err) => {
            warn!(error = %err, "dropping malformed translation");
            None
        }
    }
}

/// Decode a map of translation values, skipping ones that cannot be read.
pub fn translation_map(raw: Map<String, Value>) -> BTreeMap<String, LocalizedText> {
    raw.into_iter()
        .filter_map(|(key, value)| translation_entry(value).map(|text| (key, text)))
        .collect()
}
