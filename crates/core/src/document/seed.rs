//! Default content: the document written on first start and the values the
//! migration falls back to for missing fields.
use serde_json::Map;

use super::localized::{Language, LocalizedText};
use super::model::{
    Category, CompanyInfo, DietaryTags, Document, FooterConfig, HeroConfig, Palette, Product,
    SectionVisibility, Settings, SocialLink, Status, ThemeConfig, Translations, User,
};
use crate::auth::role::Role;

pub const DEFAULT_ANALYTICS_ID: &str = "G-B6NV0RLSSH";
pub const DEFAULT_HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1544148103-0773bf10d330?q=80&w=1920&auto=format&fit=crop";

/// Username of the bootstrap account that may never be deleted.
pub const BOOTSTRAP_DEVELOPER: &str = "developer";

const SPLASH_TEXT: &str = "Lütfen bir dil seçiniz / Please select a language";

fn user(id: &str, username: &str, password: &str, role: Role, name: &str) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        role: role.as_str().to_string(),
        name: name.to_string(),
        extra: Map::new(),
    }
}

/// Accounts injected when a document has no user list.
///
/// The `admin` account carries the developer role. Existing installs log in
/// with it expecting full access, so the mapping is kept as is.
pub fn bootstrap_users() -> Vec<User> {
    vec![
        user(
            "u_dev",
            BOOTSTRAP_DEVELOPER,
            "w3hwe7k4r4-",
            Role::Developer,
            "Developer",
        ),
        user("u_admin", "admin", "admin", Role::Developer, "System Admin"),
        user(
            "u_designer",
            "designer",
            "designer",
            Role::Designer,
            "UI Designer",
        ),
    ]
}

pub fn default_settings() -> Settings {
    Settings {
        site_title: LocalizedText::new("Restoran Menü", "Restaurant Menu"),
        default_language: Language::Tr,
        default_theme: "system".to_string(),
        currency: "TL".to_string(),
        theme_toggle_allowed: true,
        google_analytics_id: DEFAULT_ANALYTICS_ID.to_string(),
        extra: Map::new(),
    }
}

fn palette(entries: &[(&str, &str)]) -> Palette {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub fn default_theme() -> ThemeConfig {
    ThemeConfig {
        light: palette(&[
            ("--bg-color", "#f9f8f4"),
            ("--text-color", "#2b2b2b"),
            ("--card-bg", "#ffffff"),
            ("--accent-color", "#c5a059"),
        ]),
        dark: palette(&[
            ("--bg-color", "#121212"),
            ("--text-color", "#e0e0e0"),
            ("--card-bg", "#1e1e1e"),
            ("--accent-color", "#c5a059"),
        ]),
        extra: Map::new(),
    }
}

pub fn splash_text() -> LocalizedText {
    LocalizedText::uniform(SPLASH_TEXT)
}

pub fn default_translations() -> Translations {
    let mut map = std::collections::BTreeMap::new();
    map.insert(
        "welcomeTitle".to_string(),
        LocalizedText::new(
            "Lezzet Dünyasına Hoşgeldiniz",
            "Welcome to the World of Taste",
        ),
    );
    map.insert(
        "welcomeSubtitle".to_string(),
        LocalizedText::new(
            "Geleneksel lezzetlerin modern sunumu",
            "Modern presentation of traditional tastes",
        ),
    );
    map.insert("splashText".to_string(), splash_text());
    map.insert("btnSelect".to_string(), LocalizedText::new("Seç", "Select"));
    Translations(map)
}

pub fn hero_title() -> LocalizedText {
    LocalizedText::new("Hoşgeldiniz", "Welcome")
}

pub fn hero_subtitle() -> LocalizedText {
    LocalizedText::new("Lezzetli Menü", "Delicious Menu")
}

pub fn default_hero() -> HeroConfig {
    HeroConfig {
        background_image: DEFAULT_HERO_IMAGE.to_string(),
        title: hero_title(),
        subtitle: hero_subtitle(),
        status: Status::Active,
        extra: Map::new(),
    }
}

pub fn default_copyright() -> LocalizedText {
    LocalizedText::new(
        "© 2025 By Kuzu. Tüm hakları saklıdır.",
        "© 2025 By Kuzu. All rights reserved.",
    )
}

pub fn default_footer() -> FooterConfig {
    FooterConfig {
        is_active: true,
        brand_name: "By Kuzu".to_string(),
        socials: vec![
            SocialLink {
                platform: "instagram".to_string(),
                url: "#".to_string(),
                is_active: true,
            },
            SocialLink {
                platform: "facebook".to_string(),
                url: "#".to_string(),
                is_active: true,
            },
        ],
        review_link: String::new(),
        copyright: default_copyright(),
        extra: Map::new(),
    }
}

pub fn default_company() -> CompanyInfo {
    CompanyInfo {
        name: LocalizedText::uniform("Gourmet"),
        logo_text: LocalizedText::uniform("By Kuzu"),
        extra: Map::new(),
    }
}

fn category(id: &str, icon: &str, tr: &str, en: &str, order: i64) -> Category {
    Category {
        id: id.to_string(),
        icon: icon.to_string(),
        name: LocalizedText::new(tr, en),
        order,
        extra: Map::new(),
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        category("food", "🍽️", "Yemekler", "Main Courses", 1),
        category("dessert", "🧁", "Tatlılar", "Desserts", 2),
        category("drink", "🥤", "İçecekler", "Beverages", 3),
    ]
}

fn default_products() -> Vec<Product> {
    vec![
        Product {
            id: "d_baklava".to_string(),
            category_id: "dessert".to_string(),
            price: 150.0,
            name: LocalizedText::new("Fıstıklı Baklava", "Pistachio Baklava"),
            description: LocalizedText::new(
                "Gaziantep fıstığı ile hazırlanmış, çıtır el açması yufka.",
                "Crispy handmade phyllo dough prepared with Gaziantep pistachios.",
            ),
            long_description: LocalizedText::new(
                "Bol Gaziantep fıstığı ve hakiki tereyağı ile 40 kat yufkadan hazırlanır.",
                "Made with plenty of Gaziantep pistachios and real butter over 40 layers of phyllo.",
            ),
            tags: DietaryTags {
                gluten: true,
                dairy: true,
                vegetarian: true,
                ..DietaryTags::default()
            },
            image: "img/katmer.png".to_string(),
            status: Status::Active,
            order: 1,
            extra: Map::new(),
        },
        Product {
            id: "p_ayran".to_string(),
            category_id: "drink".to_string(),
            price: 100.0,
            name: LocalizedText::uniform("Ayran"),
            description: LocalizedText::new("Yayık ayranı, bol köpüklü.", "Churned ayran, frothy."),
            long_description: LocalizedText::new(
                "Doğal yoğurttan yapılan, bol köpüklü, ferahlatıcı yayık ayranı.",
                "Refreshing churned ayran made from natural yogurt with plenty of foam.",
            ),
            tags: DietaryTags {
                dairy: true,
                vegetarian: true,
                ..DietaryTags::default()
            },
            image: "img/ayran.png".to_string(),
            status: Status::Active,
            order: 1,
            extra: Map::new(),
        },
    ]
}

/// The document written when no data file exists yet.
pub fn seed_document() -> Document {
    Document {
        users: bootstrap_users(),
        logs: Vec::new(),
        settings: default_settings(),
        theme: default_theme(),
        translations: default_translations(),
        categories: default_categories(),
        products: default_products(),
        sections: SectionVisibility::default(),
        hero: default_hero(),
        footer: default_footer(),
        company: default_company(),
        extra: Map::new(),
    }
}
