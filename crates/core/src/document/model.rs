use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::localized::{Language, LocalizedText};

/// Root of the persisted site content. Stored as one JSON file.
///
/// Keys this model does not know about are carried in `extra` so that a
/// load/save cycle never drops data written by a newer client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub users: Vec<User>,
    pub logs: Vec<LogEntry>,
    pub settings: Settings,
    pub theme: ThemeConfig,
    pub translations: Translations,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub sections: SectionVisibility,
    pub hero: HeroConfig,
    pub footer: FooterConfig,
    pub company: CompanyInfo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// An admin panel account.
///
/// `role` is kept as the stored string: an unrecognised role is not an error,
/// it simply grants nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One audit record. Newest entries are at the front of `Document::logs`.
///
/// `timestamp` is ISO 8601 text. Entries carried over from older documents
/// keep whatever timestamp text they were written with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: String,
    pub username: String,
    pub role: String,
    pub action: String,
    pub detail: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub site_title: LocalizedText,
    pub default_language: Language,
    pub default_theme: String,
    pub currency: String,
    pub theme_toggle_allowed: bool,
    pub google_analytics_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// CSS custom property name to color value, e.g. `--bg-color` -> `#f9f8f4`.
pub type Palette = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub light: Palette,
    pub dark: Palette,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// UI strings keyed by message id (`welcomeTitle`, `splashText`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(pub BTreeMap<String, LocalizedText>);

impl Translations {
    pub fn get(&self, key: &str) -> Option<&LocalizedText> {
        self.0.get(key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub icon: String,
    pub name: LocalizedText,
    pub order: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Passive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DietaryTags {
    pub gluten: bool,
    pub dairy: bool,
    pub spicy: bool,
    pub vegan: bool,
    pub vegetarian: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub category_id: String,
    pub price: f64,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub long_description: LocalizedText,
    pub tags: DietaryTags,
    /// Relative URL under the public directory or an inline `data:` URL.
    pub image: String,
    pub status: Status,
    pub order: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionVisibility {
    pub header: bool,
    pub hero: bool,
    pub menu: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            header: true,
            hero: true,
            menu: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroConfig {
    pub background_image: String,
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    pub status: Status,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterConfig {
    pub is_active: bool,
    pub brand_name: String,
    pub socials: Vec<SocialLink>,
    pub review_link: String,
    pub copyright: LocalizedText,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: LocalizedText,
    pub logo_text: LocalizedText,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
