use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{CurrentUser, Identity};
use super::csrf::{self, TokenForm};
use super::flash::{self, Level};
use super::page::{DeleteButton, FieldView, Layout, SelectOption, render, render_with_status};
use super::{AppState, WebError};
use crate::forms::{CommentForm, EpisodeForm, FieldErrors};
use crate::models::episode::{Episode, EpisodeDetail};
use crate::services::{EpisodeError, ProgramChoice};

// ============================================================================
// View models
// ============================================================================

struct EpisodeRow {
    number: i32,
    title: String,
    slug: String,
    program_title: String,
}

struct CommentView {
    author: String,
    body: String,
    created_at: String,
}

struct EpisodeFields {
    programs: Vec<SelectOption>,
    program_errors: Vec<String>,
    seasons: Vec<SelectOption>,
    season_errors: Vec<String>,
    number: FieldView,
    title: FieldView,
    synopsis: FieldView,
}

impl EpisodeFields {
    fn new(form: &EpisodeForm, errors: &FieldErrors, choices: &[ProgramChoice]) -> Self {
        let program = form.program.trim();
        let season = form.season.trim();

        let programs = choices
            .iter()
            .map(|c| {
                let value = c.program.id.to_string();
                SelectOption {
                    selected: value == program,
                    value,
                    label: c.program.title.clone(),
                }
            })
            .collect();

        let seasons = choices
            .iter()
            .flat_map(|c| {
                c.seasons.iter().map(move |s| {
                    let value = s.id.to_string();
                    SelectOption {
                        selected: value == season,
                        value,
                        label: format!("{} - Season {}", c.program.title, s.number),
                    }
                })
            })
            .collect();

        Self {
            programs,
            program_errors: errors.get("program").to_vec(),
            seasons,
            season_errors: errors.get("season").to_vec(),
            number: FieldView::new(&form.number, errors, "number"),
            title: FieldView::new(&form.title, errors, "title"),
            synopsis: FieldView::new(&form.synopsis, errors, "synopsis"),
        }
    }
}

#[derive(Template)]
#[template(path = "episode/index.html")]
struct EpisodeIndexPage {
    layout: Layout,
    episodes: Vec<EpisodeRow>,
}

#[derive(Template)]
#[template(path = "episode/form.html")]
struct EpisodeFormPage {
    layout: Layout,
    heading: String,
    action: String,
    submit_label: &'static str,
    fields: EpisodeFields,
    show_delete: bool,
    delete: DeleteButton,
}

#[derive(Template)]
#[template(path = "episode/show.html")]
struct EpisodeShowPage {
    layout: Layout,
    number: i32,
    title: String,
    slug: String,
    synopsis: String,
    program_title: String,
    program_slug: String,
    season_label: String,
    comments: Vec<CommentView>,
    comment: FieldView,
    delete: DeleteButton,
}

async fn delete_button(session: &Session, episode: &Episode) -> Result<DeleteButton, WebError> {
    Ok(DeleteButton {
        action: format!("/episode/{}/delete", episode.id),
        token: csrf::token(session, &csrf::delete_id(episode.id)).await?,
    })
}

async fn show_page(
    session: &Session,
    identity: &Identity,
    detail: EpisodeDetail,
    comment: FieldView,
) -> Result<EpisodeShowPage, WebError> {
    let delete = if identity.user().is_some() {
        delete_button(session, &detail.episode).await?
    } else {
        DeleteButton::default()
    };

    let EpisodeDetail {
        episode,
        program,
        season,
        comments,
    } = detail;

    Ok(EpisodeShowPage {
        layout: Layout::new(session, identity, episode.title.clone()).await?,
        number: episode.number,
        title: episode.title,
        slug: episode.slug,
        synopsis: episode.synopsis,
        program_title: program.title,
        program_slug: program.slug,
        season_label: season
            .map(|s| format!("Season {}", s.number))
            .unwrap_or_default(),
        comments: comments
            .into_iter()
            .map(|c| CommentView {
                author: c.author_email,
                body: c.body,
                created_at: c.created_at,
            })
            .collect(),
        comment,
        delete,
    })
}

fn parse_id(raw: &str) -> Result<i32, WebError> {
    raw.parse()
        .map_err(|_| WebError::not_found("Episode", raw))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /episode/
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
) -> Result<Response, WebError> {
    let episodes = state.episodes.list().await?;

    render(&EpisodeIndexPage {
        layout: Layout::new(&session, &identity, "Episodes").await?,
        episodes: episodes
            .into_iter()
            .map(|item| EpisodeRow {
                number: item.episode.number,
                title: item.episode.title,
                slug: item.episode.slug,
                program_title: item.program_title,
            })
            .collect(),
    })
}

/// GET /episode/new
pub async fn new_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    _user: CurrentUser,
) -> Result<Response, WebError> {
    let choices = state.episodes.choices().await?;

    render(&EpisodeFormPage {
        layout: Layout::new(&session, &identity, "New episode").await?,
        heading: "Create a new episode".to_string(),
        action: "/episode/new".to_string(),
        submit_label: "Save",
        fields: EpisodeFields::new(&EpisodeForm::default(), &FieldErrors::new(), &choices),
        show_delete: false,
        delete: DeleteButton::default(),
    })
}

/// POST /episode/new
pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    _user: CurrentUser,
    Form(form): Form<EpisodeForm>,
) -> Result<Response, WebError> {
    let result = match form.validate() {
        Ok(input) => state.episodes.create(input).await,
        Err(errors) => Err(EpisodeError::Invalid(errors)),
    };

    match result {
        Ok(episode) => {
            flash::push(
                &session,
                Level::Success,
                format!("The episode \"{}\" has been created.", episode.title),
            )
            .await?;
            Ok(Redirect::to("/episode/").into_response())
        }
        Err(EpisodeError::Invalid(errors)) => {
            let choices = state.episodes.choices().await?;
            render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                &EpisodeFormPage {
                    layout: Layout::new(&session, &identity, "New episode").await?,
                    heading: "Create a new episode".to_string(),
                    action: "/episode/new".to_string(),
                    submit_label: "Save",
                    fields: EpisodeFields::new(&form, &errors, &choices),
                    show_delete: false,
                    delete: DeleteButton::default(),
                },
            )
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /episode/{slug}
pub async fn show(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let detail = state.episodes.view(&slug).await?;
    render(&show_page(&session, &identity, detail, FieldView::default()).await?)
}

/// POST /episode/{slug}
///
/// Adds a comment by the current user, then shows the episode again.
pub async fn comment(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    CurrentUser(actor): CurrentUser,
    Path(slug): Path<String>,
    Form(form): Form<CommentForm>,
) -> Result<Response, WebError> {
    match form.validate() {
        Ok(body) => {
            state.episodes.add_comment(&actor, &slug, body).await?;
            flash::push(&session, Level::Success, "Your comment has been posted.").await?;
            let detail = state.episodes.view(&slug).await?;
            render(&show_page(&session, &identity, detail, FieldView::default()).await?)
        }
        Err(errors) => {
            let detail = state.episodes.view(&slug).await?;
            let field = FieldView::new(&form.comment, &errors, "comment");
            render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                &show_page(&session, &identity, detail, field).await?,
            )
        }
    }
}

/// GET /episode/{slug}/edit
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    _user: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let episode = state.episodes.find_by_slug(&slug).await?;
    let choices = state.episodes.choices().await?;

    render(&EpisodeFormPage {
        layout: Layout::new(&session, &identity, format!("Edit {}", episode.title)).await?,
        heading: format!("Edit {}", episode.title),
        action: format!("/episode/{}/edit", episode.slug),
        submit_label: "Update",
        fields: EpisodeFields::new(
            &EpisodeForm::from_episode(&episode),
            &FieldErrors::new(),
            &choices,
        ),
        show_delete: true,
        delete: delete_button(&session, &episode).await?,
    })
}

/// POST /episode/{slug}/edit
pub async fn update(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    _user: CurrentUser,
    Path(slug): Path<String>,
    Form(form): Form<EpisodeForm>,
) -> Result<Response, WebError> {
    let episode = state.episodes.find_by_slug(&slug).await?;

    let result = match form.validate() {
        Ok(input) => state.episodes.edit(&slug, input).await,
        Err(errors) => Err(EpisodeError::Invalid(errors)),
    };

    match result {
        Ok(updated) => {
            flash::push(
                &session,
                Level::Success,
                format!("The episode \"{}\" has been updated.", updated.title),
            )
            .await?;
            Ok(Redirect::to("/episode/").into_response())
        }
        Err(EpisodeError::Invalid(errors)) => {
            let choices = state.episodes.choices().await?;
            render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                &EpisodeFormPage {
                    layout: Layout::new(&session, &identity, format!("Edit {}", episode.title))
                        .await?,
                    heading: format!("Edit {}", episode.title),
                    action: format!("/episode/{}/edit", episode.slug),
                    submit_label: "Update",
                    fields: EpisodeFields::new(&form, &errors, &choices),
                    show_delete: true,
                    delete: delete_button(&session, &episode).await?,
                },
            )
        }
        Err(e) => Err(e.into()),
    }
}

/// DELETE /episode/{id}, POST /episode/{id}/delete
pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    _user: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<TokenForm>,
) -> Result<Redirect, WebError> {
    let id = parse_id(&id)?;
    let episode = state.episodes.find_by_id(id).await?;

    if csrf::is_valid(&session, &csrf::delete_id(id), &form.token).await? {
        state.episodes.delete(id).await?;
        flash::push(
            &session,
            Level::Danger,
            format!("The episode \"{}\" has been deleted.", episode.title),
        )
        .await?;
    } else {
        tracing::warn!(episode_id = id, "Delete skipped: invalid CSRF token");
    }

    Ok(Redirect::to("/episode/"))
}
