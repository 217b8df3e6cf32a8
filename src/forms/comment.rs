use serde::Deserialize;

use super::{FieldErrors, required_text};

pub const COMMENT_MAX: usize = 2000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub comment: String,
}

impl CommentForm {
    /// Returns the trimmed comment body.
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        let body = required_text(&mut errors, "comment", &self.comment, Some(COMMENT_MAX));
        errors.into_result(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_validation() {
        let ok = CommentForm {
            comment: "  Great episode ".to_string(),
        };
        assert_eq!(ok.validate().unwrap(), "Great episode");

        assert!(CommentForm::default().validate().is_err());

        let long = CommentForm {
            comment: "x".repeat(COMMENT_MAX + 1),
        };
        assert!(long.validate().unwrap_err().has("comment"));
    }
}
