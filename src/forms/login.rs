use serde::Deserialize;

use super::{FieldErrors, required_text};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Returns `(email, password)`; the email is trimmed and lowercased.
    pub fn validate(&self) -> Result<(String, String), FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = required_text(&mut errors, "email", &self.email, Some(180)).to_lowercase();
        if self.password.is_empty() {
            errors.add("password", "This value should not be blank.");
        }
        errors.into_result((email, self.password.clone()))
    }
}
