use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::legacy::{
    translation_map, LegacyCategory, LegacyCompany, LegacyDocument, LegacyFooter, LegacyHero,
    LegacyId, LegacyLogEntry, LegacyProduct, LegacySections, LegacySettings, LegacySocialLink,
    LegacySocials, LegacyText, LegacyTheme, LegacyUser,
};
use crate::document::localized::LocalizedText;
use crate::document::model::{
    Category, CompanyInfo, DietaryTags, Document, FooterConfig, HeroConfig, LogEntry, Product,
    SectionVisibility, Settings, SocialLink, ThemeConfig, Translations, User,
};
use crate::document::seed;

/// Bring a stored document of any age to the current shape.
///
/// Total over JSON input: missing or unreadable fields are filled with
/// defaults, never rejected. Applying it to its own output changes nothing.
/// List order and fields it does not know about are left as they are.
pub fn normalize(raw: &Value) -> Document {
    let legacy = if raw.is_object() {
        LegacyDocument::deserialize(raw).unwrap_or_else(|err| {
            warn!(error = %err, "unreadable document, starting from defaults");
            LegacyDocument::default()
        })
    } else {
        warn!("document root is not an object, starting from defaults");
        LegacyDocument::default()
    };
    upgrade(legacy)
}

fn upgrade(legacy: LegacyDocument) -> Document {
    Document {
        users: upgrade_users(legacy.users),
        logs: legacy
            .logs
            .unwrap_or_default()
            .into_iter()
            .map(upgrade_log_entry)
            .collect(),
        settings: upgrade_settings(legacy.settings),
        theme: upgrade_theme(legacy.theme),
        translations: upgrade_translations(legacy.translations),
        categories: legacy
            .categories
            .unwrap_or_default()
            .into_iter()
            .map(upgrade_category)
            .collect(),
        products: legacy
            .products
            .unwrap_or_default()
            .into_iter()
            .map(upgrade_product)
            .collect(),
        sections: upgrade_sections(legacy.sections),
        hero: upgrade_hero(legacy.hero),
        footer: upgrade_footer(legacy.footer),
        company: upgrade_company(legacy.company),
        extra: legacy.extra,
    }
}

fn text_or(text: Option<LegacyText>, fallback: impl FnOnce() -> LocalizedText) -> LocalizedText {
    text.map_or_else(fallback, LegacyText::into_localized)
}

fn upgrade_users(users: Option<Vec<LegacyUser>>) -> Vec<User> {
    let Some(users) = users else {
        debug!("no user list, adding bootstrap accounts");
        return seed::bootstrap_users();
    };
    let mut users: Vec<User> = users
        .into_iter()
        .map(|u| User {
            id: u.id.map(LegacyId::into_string).unwrap_or_default(),
            username: u.username.unwrap_or_default(),
            password: u.password.unwrap_or_default(),
            role: u.role.unwrap_or_default(),
            name: u.name.unwrap_or_default(),
            extra: u.extra,
        })
        .collect();
    assign_missing_user_ids(&mut users);
    users
}

/// Give every user without an id, or with an id an earlier user already
/// holds, a fresh `u_<username>` id. Sessions and audit entries resolve the
/// acting account by id, so ids must be unique.
fn assign_missing_user_ids(users: &mut [User]) {
    let mut taken: HashSet<String> = users
        .iter()
        .filter(|u| !u.id.is_empty())
        .map(|u| u.id.clone())
        .collect();
    let mut seen = HashSet::new();
    for user in users.iter_mut() {
        if !user.id.is_empty() && seen.insert(user.id.clone()) {
            continue;
        }
        let base = if user.username.is_empty() {
            "u_user".to_string()
        } else {
            format!("u_{}", user.username)
        };
        let mut candidate = base.clone();
        let mut n = 2;
        while taken.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        debug!(username = %user.username, id = %candidate, "assigning user id");
        taken.insert(candidate.clone());
        seen.insert(candidate.clone());
        user.id = candidate;
    }
}

fn upgrade_log_entry(entry: LegacyLogEntry) -> LogEntry {
    LogEntry {
        id: entry.id.map(LegacyId::into_string).unwrap_or_default(),
        timestamp: entry
            .timestamp
            .map(LegacyId::into_string)
            .unwrap_or_default(),
        username: entry.username.unwrap_or_default(),
        role: entry.role.unwrap_or_default(),
        action: entry.action.unwrap_or_default(),
        detail: entry.detail.unwrap_or_default(),
        extra: entry.extra,
    }
}

fn upgrade_settings(settings: Option<LegacySettings>) -> Settings {
    let defaults = seed::default_settings();
    let Some(s) = settings else {
        return defaults;
    };
    let google_analytics_id = match s.google_analytics_id {
        Some(id) if !id.is_empty() => id,
        _ => {
            debug!("adding default analytics id");
            defaults.google_analytics_id
        }
    };
    Settings {
        site_title: text_or(s.site_title, || defaults.site_title),
        default_language: s.default_language.unwrap_or(defaults.default_language),
        default_theme: s.default_theme.unwrap_or(defaults.default_theme),
        currency: s.currency.unwrap_or(defaults.currency),
        theme_toggle_allowed: s
            .theme_toggle_allowed
            .unwrap_or(defaults.theme_toggle_allowed),
        google_analytics_id,
        extra: s.extra,
    }
}

fn upgrade_theme(theme: Option<LegacyTheme>) -> ThemeConfig {
    let defaults = seed::default_theme();
    let Some(t) = theme else {
        return defaults;
    };
    ThemeConfig {
        light: t.light.unwrap_or(defaults.light),
        dark: t.dark.unwrap_or(defaults.dark),
        extra: t.extra,
    }
}

fn upgrade_translations(translations: Option<Map<String, Value>>) -> Translations {
    let Some(raw) = translations else {
        return seed::default_translations();
    };
    let mut map = translation_map(raw);
    map.entry("splashText".to_string()).or_insert_with(|| {
        debug!("adding default splash text");
        seed::splash_text()
    });
    Translations(map)
}

fn upgrade_category(c: LegacyCategory) -> Category {
    Category {
        id: c.id.map(|id| id.into_string()).unwrap_or_default(),
        icon: c.icon.unwrap_or_default(),
        name: text_or(c.name, LocalizedText::default),
        order: c.order.unwrap_or_default(),
        extra: c.extra,
    }
}

fn upgrade_product(p: LegacyProduct) -> Product {
    let description = text_or(p.description, LocalizedText::default);
    // An empty plain string counts as no long description.
    let long_description = match p.long_description {
        Some(LegacyText::Plain(s)) if s.is_empty() => {
            debug!("deriving long description from description");
            LocalizedText::new(description.tr.clone(), description.en.clone())
        }
        Some(text) => text.into_localized(),
        None => {
            debug!("deriving long description from description");
            LocalizedText::new(description.tr.clone(), description.en.clone())
        }
    };
    Product {
        id: p.id.map(|id| id.into_string()).unwrap_or_default(),
        category_id: p.category_id.map(|id| id.into_string()).unwrap_or_default(),
        price: p.price.map_or(0.0, |price| price.into_f64()),
        name: text_or(p.name, LocalizedText::default),
        description,
        long_description,
        tags: p.tags.map_or_else(DietaryTags::default, |t| t.into_tags()),
        image: p.image.unwrap_or_default(),
        status: p.status.unwrap_or_default(),
        order: p.order.unwrap_or_default(),
        extra: p.extra,
    }
}

fn upgrade_sections(sections: Option<LegacySections>) -> SectionVisibility {
    let defaults = SectionVisibility::default();
    let Some(s) = sections else {
        return defaults;
    };
    SectionVisibility {
        header: s.header.unwrap_or(defaults.header),
        hero: s.hero.unwrap_or(defaults.hero),
        menu: s.menu.unwrap_or(defaults.menu),
    }
}

fn upgrade_hero(hero: Option<LegacyHero>) -> HeroConfig {
    let Some(h) = hero else {
        debug!("no hero section, using defaults");
        return seed::default_hero();
    };
    HeroConfig {
        background_image: h
            .background_image
            .unwrap_or_else(|| seed::DEFAULT_HERO_IMAGE.to_string()),
        title: text_or(h.title, seed::hero_title),
        subtitle: text_or(h.subtitle, seed::hero_subtitle),
        status: h.status.unwrap_or_default(),
        extra: h.extra,
    }
}

fn upgrade_socials(socials: Option<LegacySocials>) -> Vec<SocialLink> {
    match socials {
        None => Vec::new(),
        Some(LegacySocials::List(items)) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<LegacySocialLink>(item) {
                Ok(link) => Some(SocialLink {
                    platform: link.platform.unwrap_or_default(),
                    url: link.url.unwrap_or_default(),
                    is_active: link.is_active.unwrap_or(true),
                }),
                Err(err) => {
                    warn!(error = %err, "skipping malformed social link");
                    None
                }
            })
            .collect(),
        Some(LegacySocials::Fixed(fixed)) => {
            debug!("converting fixed social links to a list");
            [("instagram", fixed.instagram), ("facebook", fixed.facebook)]
                .into_iter()
                .filter_map(|(platform, url)| {
                    url.filter(|u| !u.is_empty()).map(|url| SocialLink {
                        platform: platform.to_string(),
                        url,
                        is_active: true,
                    })
                })
                .collect()
        }
    }
}

fn upgrade_footer(footer: Option<LegacyFooter>) -> FooterConfig {
    let defaults = seed::default_footer();
    let Some(f) = footer else {
        return defaults;
    };
    FooterConfig {
        is_active: f.is_active.unwrap_or(defaults.is_active),
        brand_name: f.brand_name.unwrap_or(defaults.brand_name),
        socials: upgrade_socials(f.socials),
        review_link: f.review_link.unwrap_or(defaults.review_link),
        copyright: text_or(f.copyright, || defaults.copyright),
        extra: f.extra,
    }
}

fn upgrade_company(company: Option<LegacyCompany>) -> CompanyInfo {
    let defaults = seed::default_company();
    let Some(c) = company else {
        return defaults;
    };
    CompanyInfo {
        name: text_or(c.name, || defaults.name),
        logo_text: text_or(c.logo_text, || defaults.logo_text),
        extra: c.extra,
    }
}
