//! Form validation.
//!
//! Each form is the raw, string-typed payload a browser submits. `validate`
//! turns it into a typed input or a set of per-field messages; rendering is
//! left to the templates.

mod comment;
mod episode;
mod login;
mod program;

pub use comment::CommentForm;
pub use episode::EpisodeForm;
pub use login::LoginForm;
pub use program::{ProgramForm, SearchQuery};

use std::collections::BTreeMap;

use crate::domain::slugify;

const NO_ERRORS: &[String] = &[];

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single failing field.
    #[must_use]
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(NO_ERRORS, Vec::as_slice)
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.fields.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// `Ok(value)` when nothing was recorded, the errors otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Trimmed value, or `None` when the field was left blank.
pub(crate) fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    max_len: Option<usize>,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, "This value should not be blank.");
    } else if let Some(max) = max_len
        && trimmed.chars().count() > max
    {
        errors.add(
            field,
            format!("This value is too long. It should have {max} characters or less."),
        );
    }
    trimmed.to_string()
}

/// Slugs taken by static routes next to `/{slug}` pages.
const RESERVED_SLUGS: &[&str] = &["new"];

/// Required title that must also produce a usable URL slug.
pub(crate) fn slugged_title(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    max_len: usize,
) -> String {
    let title = required_text(errors, field, value, Some(max_len));
    if errors.has(field) {
        return title;
    }
    let slug = slugify(&title);
    if slug.is_empty() {
        errors.add(field, "The title must contain at least one letter or digit.");
    } else if RESERVED_SLUGS.contains(&slug.as_str()) {
        errors.add(field, format!("\"{title}\" is reserved, please choose another title."));
    }
    title
}

pub(crate) fn max_length(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) {
    if let Some(v) = value
        && v.chars().count() > max
    {
        errors.add(
            field,
            format!("This value is too long. It should have {max} characters or less."),
        );
    }
}

/// Parses an optional integer field, recording an error when it is not a number
/// or falls outside `range`.
pub(crate) fn optional_int(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    range: std::ops::RangeInclusive<i32>,
) -> Option<i32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<i32>() {
        Ok(n) if range.contains(&n) => Some(n),
        Ok(_) => {
            errors.add(
                field,
                format!(
                    "This value should be between {} and {}.",
                    range.start(),
                    range.end()
                ),
            );
            None
        }
        Err(_) => {
            errors.add(field, "This value is not a valid number.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_collects_per_field() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());
        errors.add("title", "first");
        errors.add("title", "second");
        errors.add("synopsis", "third");

        assert_eq!(errors.get("title"), ["first", "second"]);
        assert!(errors.has("synopsis"));
        assert!(errors.get("poster").is_empty());
        assert_eq!(errors.to_string(), "synopsis: third; title: first; title: second");
    }

    #[test]
    fn test_slugged_title_rejects_reserved_and_empty_slugs() {
        let mut errors = FieldErrors::new();
        assert_eq!(slugged_title(&mut errors, "title", " Dark ", 255), "Dark");
        assert!(errors.is_empty());

        slugged_title(&mut errors, "title", "New", 255);
        assert_eq!(errors.get("title").len(), 1);

        let mut errors = FieldErrors::new();
        slugged_title(&mut errors, "title", " NEW! ", 255);
        assert!(errors.has("title"));

        let mut errors = FieldErrors::new();
        slugged_title(&mut errors, "title", "!!!", 255);
        assert!(errors.has("title"));

        // "New Girl" slugs to "new-girl", which is free.
        let mut errors = FieldErrors::new();
        slugged_title(&mut errors, "title", "New Girl", 255);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_optional_int() {
        let mut errors = FieldErrors::new();
        assert_eq!(optional_int(&mut errors, "year", "", 1900..=2100), None);
        assert_eq!(optional_int(&mut errors, "year", " 2008 ", 1900..=2100), Some(2008));
        assert!(errors.is_empty());

        assert_eq!(optional_int(&mut errors, "year", "abc", 1900..=2100), None);
        assert_eq!(optional_int(&mut errors, "year", "1800", 1900..=2100), None);
        assert_eq!(errors.get("year").len(), 2);
    }
}
