//! Session-bound CSRF tokens for destructive forms.
//!
//! Each token id (for example `delete42`) gets one random token per session.
//! Forms echo it back in a `_token` field.

use std::collections::HashMap;

use rand::RngCore;
use serde::Deserialize;
use tower_sessions::Session;

const CSRF_KEY: &str = "_csrf_tokens";

/// Body of the delete forms.
#[derive(Debug, Default, Deserialize)]
pub struct TokenForm {
    #[serde(rename = "_token", default)]
    pub token: String,
}

/// Token id for delete forms. Programs and episodes share the `delete{id}`
/// namespace, so a token issued for program 5 also passes for episode 5.
#[must_use]
pub fn delete_id(id: i32) -> String {
    format!("delete{id}")
}

fn generate() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Returns the token for `id`, creating it on first use in this session.
pub async fn token(session: &Session, id: &str) -> Result<String, tower_sessions::session::Error> {
    let mut tokens: HashMap<String, String> = session.get(CSRF_KEY).await?.unwrap_or_default();
    if let Some(existing) = tokens.get(id) {
        return Ok(existing.clone());
    }

    let fresh = generate();
    tokens.insert(id.to_string(), fresh.clone());
    session.insert(CSRF_KEY, tokens).await?;
    Ok(fresh)
}

pub async fn is_valid(
    session: &Session,
    id: &str,
    submitted: &str,
) -> Result<bool, tower_sessions::session::Error> {
    let tokens: HashMap<String, String> = session.get(CSRF_KEY).await?.unwrap_or_default();
    Ok(tokens
        .get(id)
        .is_some_and(|expected| constant_time_eq(expected.as_bytes(), submitted.as_bytes())))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
