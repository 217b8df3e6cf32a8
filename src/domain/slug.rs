use regex::Regex;
use std::sync::OnceLock;

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex"))
}

/// Folds the accented Latin letters commonly found in titles to ASCII.
fn fold_char(c: char) -> &'static str {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'œ' => "oe",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        _ => "",
    }
}

/// Turns a title into a lowercase, hyphenated, URL-safe identifier.
///
/// ```rust
/// use wildseries::domain::slugify;
///
/// assert_eq!(slugify("Breaking Code"), "breaking-code");
/// assert_eq!(slugify("  L'Été meurtrier!  "), "l-ete-meurtrier");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut folded = String::with_capacity(title.len());
    for c in title.trim().to_lowercase().chars() {
        if c.is_ascii() {
            folded.push(c);
        } else {
            let replacement = fold_char(c);
            if replacement.is_empty() {
                folded.push(' ');
            } else {
                folded.push_str(replacement);
            }
        }
    }

    separator_regex()
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}
