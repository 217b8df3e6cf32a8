use askama::Template;
use axum::{extract::State, response::Response};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::Identity;
use super::page::{Layout, render};
use super::programs::ProgramCard;
use super::{AppState, WebError};

struct MemberRow {
    email: String,
    member_since: String,
    is_viewer: bool,
}

#[derive(Template)]
#[template(path = "profile/index.html")]
struct ProfilePage {
    layout: Layout,
    members: Vec<MemberRow>,
    favorites: Vec<ProgramCard>,
}

/// GET /my-profile
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
) -> Result<Response, WebError> {
    let viewer = identity.actor();
    let overview = state.profiles.overview(viewer.as_ref()).await?;

    render(&ProfilePage {
        layout: Layout::new(&session, &identity, "My profile").await?,
        members: overview
            .users
            .into_iter()
            .map(|u| MemberRow {
                is_viewer: viewer.as_ref().is_some_and(|a| a.id == u.id),
                member_since: u.created_at.get(..10).unwrap_or(u.created_at.as_str()).to_string(),
                email: u.email,
            })
            .collect(),
        favorites: overview
            .favorites
            .iter()
            .map(|p| ProgramCard::from_program(p, 120))
            .collect(),
    })
}
