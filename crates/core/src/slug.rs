//! URL slug generation for translated titles.
//!
//! Azerbaijani letters and Cyrillic are transliterated to ASCII so that every
//! locale produces readable, URL-safe slugs.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum slug length in bytes (all output is ASCII).
pub const MAX_SLUG_LEN: usize = 120;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex"));

/// Check that `slug` is lowercase ASCII words joined by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    slug.len() <= MAX_SLUG_LEN && SLUG_RE.is_match(slug)
}

/// Build a slug from free text.
///
/// Returns an empty string when `text` has no transliterable characters;
/// callers treat that as a validation failure.
///
/// ```
/// use vitrin_core::slug::slugify;
///
/// assert_eq!(slugify("Şirkətimiz haqqında"), "sirketimiz-haqqinda");
/// assert_eq!(slugify("Наши услуги"), "nashi-uslugi");
/// ```
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        let mapped = match transliterate(ch) {
            Some(s) => s.to_string(),
            None => ch.to_lowercase().collect::<String>(),
        };

        for c in mapped.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                pending_dash = false;
                out.push(c.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        }
    }

    truncate_at_word(out, MAX_SLUG_LEN)
}

fn truncate_at_word(slug: String, max: usize) -> String {
    if slug.len() <= max {
        return slug;
    }
    let cut = &slug[..max];
    match cut.rfind('-') {
        Some(idx) if idx > 0 => cut[..idx].to_string(),
        _ => cut.to_string(),
    }
}

fn transliterate(ch: char) -> Option<&'static str> {
    let s = match ch {
        // Azerbaijani / Turkic
        'ə' | 'Ə' => "e",
        'ı' | 'İ' => "i",
        'ö' | 'Ö' => "o",
        'ü' | 'Ü' => "u",
        'ç' | 'Ç' => "c",
        'ş' | 'Ş' => "s",
        'ğ' | 'Ğ' => "g",
        // Russian Cyrillic
        'а' | 'А' => "a",
        'б' | 'Б' => "b",
        'в' | 'В' => "v",
        'г' | 'Г' => "g",
        'д' | 'Д' => "d",
        'е' | 'Е' | 'э' | 'Э' => "e",
        'ё' | 'Ё' => "yo",
        'ж' | 'Ж' => "zh",
        'з' | 'З' => "z",
        'и' | 'И' => "i",
        'й' | 'Й' | 'ы' | 'Ы' => "y",
        'к' | 'К' => "k",
        'л' | 'Л' => "l",
        'м' | 'М' => "m",
        'н' | 'Н' => "n",
        'о' | 'О' => "o",
        'п' | 'П' => "p",
        'р' | 'Р' => "r",
        'с' | 'С' => "s",
        'т' | 'Т' => "t",
        'у' | 'У' => "u",
        'ф' | 'Ф' => "f",
        'х' | 'Х' => "kh",
        'ц' | 'Ц' => "ts",
        'ч' | 'Ч' => "ch",
        'ш' | 'Ш' => "sh",
        'щ' | 'Щ' => "shch",
        'ъ' | 'Ъ' | 'ь' | 'Ь' => "",
        'ю' | 'Ю' => "yu",
        'я' | 'Я' => "ya",
        _ => return None,
    };
    Some(s)
}
