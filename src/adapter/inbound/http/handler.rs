//! Request handlers for the `/Students` pages.
//!
//! Handlers decode the request, verify the anti-forgery token on POST, call
//! into [`StudentRecords`] and map the [`Outcome`] onto an HTML response or a
//! `303 See Other` redirect.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{self, Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use crate::application::student::{Outcome, Redirect, StudentFormView, StudentRecords};
use crate::domain::{StudentForm, StudentId};

use super::antiforgery::{self, AntiforgeryToken};
use super::error::HttpError;
use super::view;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub records: StudentRecords,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(rename = "saveChangesError")]
    pub save_changes_error: Option<String>,
}

impl DeleteQuery {
    fn flagged(&self) -> bool {
        self.save_changes_error
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }
}

/// Create/edit body: the editable fields plus the anti-forgery token.
///
/// Anything else in the body, `ID` included, is dropped during decoding.
#[derive(Debug, Deserialize)]
pub struct StudentSubmission {
    #[serde(rename = "__RequestVerificationToken")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub form: StudentForm,
}

/// Delete body: only the anti-forgery token is read.
#[derive(Debug, Deserialize)]
pub struct TokenOnly {
    #[serde(rename = "__RequestVerificationToken")]
    pub token: Option<String>,
}

/// Route parameter as a student ID. Missing and non-numeric both yield `None`.
fn parse_id(id: Option<Path<String>>) -> Option<StudentId> {
    id.and_then(|Path(raw)| raw.parse().ok())
}

fn redirect(target: Redirect) -> Response {
    response::Redirect::to(&target.location()).into_response()
}

fn form_page(outcome: Outcome<StudentFormView>, token: &AntiforgeryToken) -> Result<Response, HttpError> {
    match outcome {
        Outcome::View(form) => Ok(token.attach(Html(view::student_form(&form, token)).into_response())),
        Outcome::Redirect(target) => Ok(redirect(target)),
        Outcome::NotFound => Err(HttpError::NotFound),
    }
}

pub async fn home() -> Response {
    redirect(Redirect::List)
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, HttpError> {
    let list = state.records.list(query.sort_order.as_deref()).await?;
    Ok(Html(view::student_list(&list)))
}

pub async fn details(
    State(state): State<AppState>,
    id: Option<Path<String>>,
) -> Result<Html<String>, HttpError> {
    match state.records.details(parse_id(id)).await? {
        Outcome::View(details) => Ok(Html(view::student_details(&details))),
        _ => Err(HttpError::NotFound),
    }
}

pub async fn create_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = AntiforgeryToken::for_request(&headers);
    let form = state.records.create_form();
    token.attach(Html(view::student_form(&form, &token)).into_response())
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(submission): Form<StudentSubmission>,
) -> Result<Response, HttpError> {
    let token = antiforgery::verify(&headers, submission.token.as_deref())?;
    form_page(state.records.create(submission.form).await, &token)
}

pub async fn edit_form(
    State(state): State<AppState>,
    id: Option<Path<String>>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let token = AntiforgeryToken::for_request(&headers);
    form_page(state.records.edit_form(parse_id(id)).await?, &token)
}

pub async fn edit(
    State(state): State<AppState>,
    id: Option<Path<String>>,
    headers: HeaderMap,
    Form(submission): Form<StudentSubmission>,
) -> Result<Response, HttpError> {
    let token = antiforgery::verify(&headers, submission.token.as_deref())?;
    form_page(state.records.edit(parse_id(id), submission.form).await?, &token)
}

pub async fn delete_confirmation(
    State(state): State<AppState>,
    id: Option<Path<String>>,
    Query(query): Query<DeleteQuery>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let token = AntiforgeryToken::for_request(&headers);
    match state
        .records
        .delete_confirmation(parse_id(id), query.flagged())
        .await?
    {
        Outcome::View(confirmation) => Ok(token.attach(
            Html(view::delete_confirmation(&confirmation, &token)).into_response(),
        )),
        Outcome::Redirect(target) => Ok(redirect(target)),
        Outcome::NotFound => Err(HttpError::NotFound),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    id: Option<Path<String>>,
    headers: HeaderMap,
    Form(body): Form<TokenOnly>,
) -> Result<Response, HttpError> {
    antiforgery::verify(&headers, body.token.as_deref())?;
    let Some(id) = parse_id(id) else {
        return Ok(redirect(Redirect::List));
    };
    Ok(redirect(state.records.delete(id).await?))
}

pub async fn not_found() -> HttpError {
    HttpError::NotFound
}
