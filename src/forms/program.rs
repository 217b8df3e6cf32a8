use serde::Deserialize;

use super::{FieldErrors, max_length, optional, optional_int, required_text, slugged_title};
use crate::models::program::{Program, ProgramInput};

pub const TITLE_MAX: usize = 255;

/// Create/edit program form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProgramForm {
    pub title: String,
    pub synopsis: String,
    pub poster: String,
    pub country: String,
    pub year: String,
}

impl ProgramForm {
    /// Pre-fills the form from a stored program.
    #[must_use]
    pub fn from_program(program: &Program) -> Self {
        Self {
            title: program.title.clone(),
            synopsis: program.synopsis.clone(),
            poster: program.poster.clone().unwrap_or_default(),
            country: program.country.clone().unwrap_or_default(),
            year: program.year.map(|y| y.to_string()).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ProgramInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = slugged_title(&mut errors, "title", &self.title, TITLE_MAX);
        let synopsis = required_text(&mut errors, "synopsis", &self.synopsis, None);

        let poster = optional(&self.poster);
        max_length(&mut errors, "poster", poster.as_deref(), 255);
        if let Some(p) = &poster
            && url::Url::parse(p).is_err()
        {
            errors.add("poster", "This value is not a valid URL.");
        }

        let country = optional(&self.country);
        max_length(&mut errors, "country", country.as_deref(), 100);

        let year = optional_int(&mut errors, "year", &self.year, 1900..=2100);

        errors.into_result(ProgramInput {
            title,
            synopsis,
            poster,
            country,
            year,
        })
    }
}

/// Query string of the program index page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub search: String,
}

impl SearchQuery {
    /// The trimmed search term, or `None` when the list should not be filtered.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, synopsis: &str) -> ProgramForm {
        ProgramForm {
            title: title.to_string(),
            synopsis: synopsis.to_string(),
            ..ProgramForm::default()
        }
    }

    #[test]
    fn test_valid_program_form() {
        let mut f = form("  Breaking Code ", "A chemist learns Rust.");
        f.year = "2008".to_string();
        f.poster = "https://example.com/poster.jpg".to_string();

        let input = f.validate().unwrap();
        assert_eq!(input.title, "Breaking Code");
        assert_eq!(input.year, Some(2008));
        assert_eq!(input.country, None);
        assert_eq!(input.poster.as_deref(), Some("https://example.com/poster.jpg"));
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let errors = form("", "   ").validate().unwrap_err();
        assert!(errors.has("title"));
        assert!(errors.has("synopsis"));
    }

    #[test]
    fn test_title_without_slug_material_is_rejected() {
        let errors = form("???", "Synopsis").validate().unwrap_err();
        assert_eq!(errors.get("title").len(), 1);
    }

    #[test]
    fn test_title_too_long() {
        let errors = form(&"a".repeat(256), "Synopsis").validate().unwrap_err();
        assert!(errors.has("title"));
        assert!(form(&"a".repeat(255), "Synopsis").validate().is_ok());
    }

    #[test]
    fn test_invalid_optional_fields() {
        let mut f = form("Title", "Synopsis");
        f.year = "next year".to_string();
        f.poster = "not a url".to_string();
        let errors = f.validate().unwrap_err();
        assert!(errors.has("year"));
        assert!(errors.has("poster"));
        assert!(!errors.has("title"));
    }

    #[test]
    fn test_search_term() {
        let q = SearchQuery {
            search: "  walk ".to_string(),
        };
        assert_eq!(q.term(), Some("walk"));
        assert_eq!(SearchQuery::default().term(), None);
    }
}
