//! Payloads of the admin panel's edit forms.
use serde::{Deserialize, Serialize};

use crate::document::localized::LocalizedText;
use crate::document::model::{DietaryTags, Status};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub name: String,
}

/// Category form. On update the id must match the path; it cannot change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub id: String,
    #[serde(default)]
    pub icon: String,
    pub name: LocalizedText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub category_id: String,
    pub price: f64,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub long_description: LocalizedText,
    #[serde(default)]
    pub tags: DietaryTags,
    /// Relative path returned by the image upload, or an inline `data:` URL.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub status: Status,
}

/// New display order: every id of the list, first to last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reorder {
    pub ids: Vec<String>,
}
