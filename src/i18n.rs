// File: ./src/i18n.rs
//! Locale selection. Translations live in `locales/*.json` and are looked up
//! with `rust_i18n::t!`.

/// Locales shipped in `locales/`.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "vi"];
pub const DEFAULT_LOCALE: &str = "en";

/// Picks the first supported locale among the configured one and the system
/// one, matching on the language part only (`vi-VN` -> `vi`).
pub fn resolve_locale(preferred: Option<&str>, system: Option<&str>) -> &'static str {
    [preferred, system]
        .into_iter()
        .flatten()
        .find_map(|tag| {
            let lang = tag
                .split(['-', '_', '.'])
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            SUPPORTED_LOCALES.iter().copied().find(|l| *l == lang)
        })
        .unwrap_or(DEFAULT_LOCALE)
}

/// Applies the resolved locale globally and returns it.
pub fn init(preferred: Option<&str>) -> &'static str {
    let system = sys_locale::get_locale();
    let locale = resolve_locale(preferred, system.as_deref());
    rust_i18n::set_locale(locale);
    log::debug!("Using locale '{}' (system: {:?})", locale, system);
    locale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_locale() {
        assert_eq!(resolve_locale(Some("vi"), Some("en-US")), "vi");
        assert_eq!(resolve_locale(None, Some("vi-VN")), "vi");
        assert_eq!(resolve_locale(Some("fr"), Some("de_DE.UTF-8")), "en");
        assert_eq!(resolve_locale(Some("fr"), Some("vi_VN")), "vi");
        assert_eq!(resolve_locale(None, None), "en");
    }
}
