use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{CurrentUser, Identity};
use super::csrf::{self, TokenForm};
use super::flash::{self, Level};
use super::page::{DeleteButton, FieldView, Layout, excerpt, render, render_with_status};
use super::{AppState, WebError};
use crate::forms::{FieldErrors, ProgramForm, SearchQuery};
use crate::models::episode::Episode;
use crate::models::program::{Program, ProgramDetail};
use crate::services::ProgramError;

// ============================================================================
// View models
// ============================================================================

pub struct ProgramCard {
    pub title: String,
    pub slug: String,
    pub synopsis: String,
    pub poster: String,
    pub has_poster: bool,
    pub meta: String,
}

impl ProgramCard {
    pub(super) fn from_program(program: &Program, synopsis_chars: usize) -> Self {
        let meta = [
            program.country.clone(),
            program.year.map(|y| y.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");

        Self {
            title: program.title.clone(),
            slug: program.slug.clone(),
            synopsis: excerpt(&program.synopsis, synopsis_chars),
            poster: program.poster.clone().unwrap_or_default(),
            has_poster: program.poster.is_some(),
            meta,
        }
    }
}

pub struct EpisodeLink {
    pub number: i32,
    pub title: String,
    pub slug: String,
}

impl From<&Episode> for EpisodeLink {
    fn from(episode: &Episode) -> Self {
        Self {
            number: episode.number,
            title: episode.title.clone(),
            slug: episode.slug.clone(),
        }
    }
}

pub struct SeasonView {
    pub number: i32,
    pub year: String,
    pub description: String,
    pub episodes: Vec<EpisodeLink>,
}

struct ProgramFields {
    title: FieldView,
    synopsis: FieldView,
    poster: FieldView,
    country: FieldView,
    year: FieldView,
}

impl ProgramFields {
    fn new(form: &ProgramForm, errors: &FieldErrors) -> Self {
        Self {
            title: FieldView::new(&form.title, errors, "title"),
            synopsis: FieldView::new(&form.synopsis, errors, "synopsis"),
            poster: FieldView::new(&form.poster, errors, "poster"),
            country: FieldView::new(&form.country, errors, "country"),
            year: FieldView::new(&form.year, errors, "year"),
        }
    }
}

#[derive(Template)]
#[template(path = "program/index.html")]
struct ProgramIndexPage {
    layout: Layout,
    search: String,
    programs: Vec<ProgramCard>,
}

#[derive(Template)]
#[template(path = "program/form.html")]
struct ProgramFormPage {
    layout: Layout,
    heading: String,
    action: String,
    submit_label: &'static str,
    fields: ProgramFields,
    show_delete: bool,
    delete: DeleteButton,
}

#[derive(Template)]
#[template(path = "program/show.html")]
struct ProgramShowPage {
    layout: Layout,
    program: ProgramCard,
    synopsis: String,
    owner_email: String,
    seasons: Vec<SeasonView>,
    loose_episodes: Vec<EpisodeLink>,
    favorite_count: u64,
    is_favorite: bool,
    can_edit: bool,
    delete: DeleteButton,
}

async fn delete_button(session: &Session, program: &Program) -> Result<DeleteButton, WebError> {
    Ok(DeleteButton {
        action: format!("/program/{}/delete", program.id),
        token: csrf::token(session, &csrf::delete_id(program.id)).await?,
    })
}

fn parse_id(raw: &str) -> Result<i32, WebError> {
    raw.parse()
        .map_err(|_| WebError::not_found("Program", raw))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /program/
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    Query(query): Query<SearchQuery>,
) -> Result<Response, WebError> {
    let programs = state.programs.list(query.term()).await?;

    render(&ProgramIndexPage {
        layout: Layout::new(&session, &identity, "Programs").await?,
        search: query.search.trim().to_string(),
        programs: programs
            .iter()
            .map(|p| ProgramCard::from_program(p, 160))
            .collect(),
    })
}

/// GET /program/new
pub async fn new_form(
    session: Session,
    identity: Identity,
    _user: CurrentUser,
) -> Result<Response, WebError> {
    render(&ProgramFormPage {
        layout: Layout::new(&session, &identity, "New program").await?,
        heading: "Create a new program".to_string(),
        action: "/program/new".to_string(),
        submit_label: "Save",
        fields: ProgramFields::new(&ProgramForm::default(), &FieldErrors::new()),
        show_delete: false,
        delete: DeleteButton::default(),
    })
}

/// POST /program/new
pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    CurrentUser(actor): CurrentUser,
    Form(form): Form<ProgramForm>,
) -> Result<Response, WebError> {
    let result = match form.validate() {
        Ok(input) => state.programs.create(&actor, input).await,
        Err(errors) => Err(ProgramError::Invalid(errors)),
    };

    match result {
        Ok(program) => {
            flash::push(
                &session,
                Level::Success,
                format!("The program \"{}\" has been created.", program.title),
            )
            .await?;
            Ok(Redirect::to("/program/").into_response())
        }
        Err(ProgramError::Invalid(errors)) => render_with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            &ProgramFormPage {
                layout: Layout::new(&session, &identity, "New program").await?,
                heading: "Create a new program".to_string(),
                action: "/program/new".to_string(),
                submit_label: "Save",
                fields: ProgramFields::new(&form, &errors),
                show_delete: false,
                delete: DeleteButton::default(),
            },
        ),
        Err(e) => Err(e.into()),
    }
}

/// GET /program/{slug}
pub async fn show(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let viewer = identity.actor();
    let ProgramDetail {
        program,
        owner_email,
        seasons,
        loose_episodes,
        favorite_count,
        is_favorite,
    } = state.programs.view(&slug, viewer.as_ref()).await?;

    let can_edit = viewer.as_ref().is_some_and(|a| program.is_owned_by(a.id));
    let delete = if can_edit {
        delete_button(&session, &program).await?
    } else {
        DeleteButton::default()
    };

    render(&ProgramShowPage {
        layout: Layout::new(&session, &identity, program.title.clone()).await?,
        program: ProgramCard::from_program(&program, usize::MAX),
        synopsis: program.synopsis.clone(),
        owner_email: owner_email.unwrap_or_default(),
        seasons: seasons
            .into_iter()
            .map(|s| SeasonView {
                number: s.season.number,
                year: s.season.year.map(|y| y.to_string()).unwrap_or_default(),
                description: s.season.description,
                episodes: s.episodes.iter().map(EpisodeLink::from).collect(),
            })
            .collect(),
        loose_episodes: loose_episodes.iter().map(EpisodeLink::from).collect(),
        favorite_count,
        is_favorite,
        can_edit,
        delete,
    })
}

/// GET /program/{slug}/edit
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    CurrentUser(actor): CurrentUser,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let program = state.programs.find_for_edit(&actor, &slug).await?;

    render(&ProgramFormPage {
        layout: Layout::new(&session, &identity, format!("Edit {}", program.title)).await?,
        heading: format!("Edit {}", program.title),
        action: format!("/program/{}/edit", program.slug),
        submit_label: "Update",
        fields: ProgramFields::new(&ProgramForm::from_program(&program), &FieldErrors::new()),
        show_delete: true,
        delete: delete_button(&session, &program).await?,
    })
}

/// POST /program/{slug}/edit
pub async fn update(
    State(state): State<Arc<AppState>>,
    session: Session,
    identity: Identity,
    CurrentUser(actor): CurrentUser,
    Path(slug): Path<String>,
    Form(form): Form<ProgramForm>,
) -> Result<Response, WebError> {
    // Ownership is checked before the submitted fields are looked at.
    let program = state.programs.find_for_edit(&actor, &slug).await?;

    let result = match form.validate() {
        Ok(input) => state.programs.edit(&actor, &slug, input).await,
        Err(errors) => Err(ProgramError::Invalid(errors)),
    };

    match result {
        Ok(updated) => {
            flash::push(
                &session,
                Level::Success,
                format!("The program \"{}\" has been updated.", updated.title),
            )
            .await?;
            Ok(Redirect::to("/program/").into_response())
        }
        Err(ProgramError::Invalid(errors)) => render_with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            &ProgramFormPage {
                layout: Layout::new(&session, &identity, format!("Edit {}", program.title))
                    .await?,
                heading: format!("Edit {}", program.title),
                action: format!("/program/{}/edit", program.slug),
                submit_label: "Update",
                fields: ProgramFields::new(&form, &errors),
                show_delete: true,
                delete: delete_button(&session, &program).await?,
            },
        ),
        Err(e) => Err(e.into()),
    }
}

/// POST /program/{slug}/favorite
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    session: Session,
    CurrentUser(actor): CurrentUser,
    Path(slug): Path<String>,
) -> Result<Redirect, WebError> {
    let favorite = state.programs.toggle_favorite(&actor, &slug).await?;
    let message = if favorite {
        "Added to your watchlist."
    } else {
        "Removed from your watchlist."
    };
    flash::push(&session, Level::Info, message).await?;
    Ok(Redirect::to(&format!("/program/{slug}")))
}

/// DELETE /program/{id}, POST /program/{id}/delete
///
/// A missing or wrong `_token` skips the deletion without telling the user.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    _user: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<TokenForm>,
) -> Result<Redirect, WebError> {
    let id = parse_id(&id)?;
    let program = state.programs.find_by_id(id).await?;

    if csrf::is_valid(&session, &csrf::delete_id(id), &form.token).await? {
        state.programs.delete(id).await?;
        flash::push(
            &session,
            Level::Danger,
            format!("The program \"{}\" has been deleted.", program.title),
        )
        .await?;
    } else {
        tracing::warn!(program_id = id, "Delete skipped: invalid CSRF token");
    }

    Ok(Redirect::to("/program/"))
}
