//! Column-header canonicalization.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical form of a spreadsheet column header: lowercase, diacritics
/// stripped, everything outside `[a-z0-9]` removed.
///
/// This is the single point of tolerance for header variability —
/// "Dano Causado", "DanoCausado" and "dano_causado" all resolve to
/// `danocausado`. An empty header normalizes to the empty string and
/// matches nothing.
pub fn normalize_key(key: &str) -> String {
    key.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}
