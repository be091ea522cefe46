//! Site-wide configuration edits. All require `canManageSettings` and are
//! audited as `update_settings`.
use super::types::Reorder;
use crate::auth::audit::AuditAction;
use crate::auth::role::Capability;
use crate::auth::session::Session;
use crate::document::model::{
    CompanyInfo, Document, FooterConfig, HeroConfig, SectionVisibility, Settings, ThemeConfig,
    Translations,
};
use crate::document::seed;
use crate::error::AuthError;

fn apply<T>(
    session: &Session,
    doc: &mut Document,
    detail: &str,
    edit: impl FnOnce(&mut Document) -> T,
) -> Result<T, AuthError> {
    session.require(Capability::ManageSettings)?;
    let out = edit(doc);
    session.log_action(doc, AuditAction::UpdateSettings, detail);
    Ok(out)
}

pub fn update_settings(
    session: &Session,
    doc: &mut Document,
    settings: Settings,
) -> Result<(), AuthError> {
    apply(session, doc, "General settings updated", |d| d.settings = settings)
}

pub fn update_theme(
    session: &Session,
    doc: &mut Document,
    theme: ThemeConfig,
) -> Result<(), AuthError> {
    apply(session, doc, "Theme settings updated", |d| d.theme = theme)
}

/// Restore the stock light and dark palettes.
pub fn reset_theme(session: &Session, doc: &mut Document) -> Result<ThemeConfig, AuthError> {
    apply(session, doc, "Theme settings reset", |d| {
        d.theme = seed::default_theme();
        d.theme.clone()
    })
}

pub fn update_hero(session: &Session, doc: &mut Document, hero: HeroConfig) -> Result<(), AuthError> {
    apply(session, doc, "Hero settings updated", |d| d.hero = hero)
}

pub fn update_footer(
    session: &Session,
    doc: &mut Document,
    footer: FooterConfig,
) -> Result<(), AuthError> {
    apply(session, doc, "Footer settings updated", |d| d.footer = footer)
}

pub fn update_company(
    session: &Session,
    doc: &mut Document,
    company: CompanyInfo,
) -> Result<(), AuthError> {
    apply(session, doc, "Company details updated", |d| d.company = company)
}

pub fn update_sections(
    session: &Session,
    doc: &mut Document,
    sections: SectionVisibility,
) -> Result<(), AuthError> {
    apply(session, doc, "Section visibility updated", |d| {
        d.sections = sections;
    })
}

/// Merge the given keys into the translation table; other keys are kept.
pub fn update_translations(
    session: &Session,
    doc: &mut Document,
    translations: Translations,
) -> Result<(), AuthError> {
    apply(session, doc, "Translations updated", |d| {
        d.translations.0.extend(translations.0);
    })
}

/// Social links are edited as part of the footer, but their order can be
/// changed alone by platform name.
pub fn reorder_socials(
    session: &Session,
    doc: &mut Document,
    reorder: &Reorder,
) -> Result<(), AuthError> {
    apply(session, doc, "Footer social links reordered", |d| {
        let position = |platform: &str| {
            reorder
                .ids
                .iter()
                .position(|p| p == platform)
                .unwrap_or(usize::MAX)
        };
        d.footer.socials.sort_by_key(|s| position(&s.platform));
    })
}
