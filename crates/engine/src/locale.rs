//! Locale string helpers.

/// Language code of a locale: the part before the first separator,
/// lowercased. `"fr-CA"` -> `"fr"`.
pub fn language_code(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}

/// Country code of a locale: the part after the last separator, uppercased.
/// A locale without a separator is returned unchanged.
pub fn country_code(locale: &str) -> String {
    match locale.rsplit_once(['-', '_']) {
        Some((_, country)) => country.to_uppercase(),
        None => locale.to_string(),
    }
}
