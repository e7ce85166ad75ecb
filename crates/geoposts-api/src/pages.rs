use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::WithRejection;
use axum_extra::extract::cookie::SignedCookieJar;
use bson::oid::ObjectId;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::forms::{FieldErrors, NewLocationForm, NewPostForm};
use crate::session::{issue_csrf, push_flash, take_flash, verify_csrf};
use crate::state::AppState;
use crate::templates;

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub id: Option<String>,
}

/// GET / — map of all locations around the viewport.
pub async fn home(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    let (jar, flash) = take_flash(jar);
    let page = templates::map_page(&state.maps_key, flash.as_ref());
    (jar, Html(page.into_string()))
}

/// GET /detail?id=… — a single location.
pub async fn detail(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<DetailQuery>, ApiError>,
) -> ApiResult<Html<String>> {
    let raw = query
        .id
        .ok_or_else(|| ApiError::BadRequest("id: This field is required.".into()))?;
    let id = ObjectId::parse_str(raw.trim())
        .map_err(|_| ApiError::BadRequest("id: Not a valid location id.".into()))?;

    let location = state.db.get_location(id).await?.ok_or(ApiError::NotFound)?;

    let page = templates::detail_page(&state.maps_key, &location.to_dict());
    Ok(Html(page.into_string()))
}

// -- New location --

pub async fn new_location_form(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    render_location_form(&state, jar, &NewLocationForm::default(), &FieldErrors::new())
}

pub async fn new_location_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    WithRejection(Form(form), _): WithRejection<Form<NewLocationForm>, ApiError>,
) -> ApiResult<Response> {
    if let Err(message) = verify_csrf(&jar, &form.csrf_token) {
        let errors = FieldErrors::from([("csrf_token", message.to_string())]);
        return Ok(render_location_form(&state, jar, &form, &errors));
    }

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            debug!("New location form rejected: {:?}", errors);
            return Ok(render_location_form(&state, jar, &form, &errors));
        }
    };

    state
        .db
        .create_location(Some(valid.description), valid.latitude, valid.longitude)
        .await?;

    let jar = push_flash(jar, "success", "New location created!");
    Ok((jar, Redirect::to("/")).into_response())
}

fn render_location_form(
    state: &AppState,
    jar: SignedCookieJar,
    form: &NewLocationForm,
    errors: &FieldErrors,
) -> Response {
    let (jar, token) = issue_csrf(jar);
    let page = templates::new_location_page(&state.maps_key, form, errors, &token);
    (jar, Html(page.into_string())).into_response()
}

// -- New post --

pub async fn new_post_form(jar: SignedCookieJar) -> Response {
    render_post_form(jar, &NewPostForm::default(), &FieldErrors::new())
}

pub async fn new_post_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    WithRejection(Form(form), _): WithRejection<Form<NewPostForm>, ApiError>,
) -> ApiResult<Response> {
    if let Err(message) = verify_csrf(&jar, &form.csrf_token) {
        let errors = FieldErrors::from([("csrf_token", message.to_string())]);
        return Ok(render_post_form(jar, &form, &errors));
    }

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            debug!("New post form rejected: {:?}", errors);
            return Ok(render_post_form(jar, &form, &errors));
        }
    };

    state.db.create_post(valid.title, valid.content).await?;

    let jar = push_flash(jar, "success", "New post added!");
    Ok((jar, Redirect::to("/")).into_response())
}

fn render_post_form(jar: SignedCookieJar, form: &NewPostForm, errors: &FieldErrors) -> Response {
    let (jar, token) = issue_csrf(jar);
    let page = templates::new_post_page(form, errors, &token);
    (jar, Html(page.into_string())).into_response()
}
