use axum::{
    Extension, Form, Router,
    extract::{Query, State},
    http::{HeaderMap, header},
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get},
};
use db::models::{project::Project, task::Task};
use serde::Deserialize;
use url::Url;

use crate::{
    AppState,
    error::ApiError,
    forms::{FieldErrors, TaskForm},
    middleware::load_task_middleware,
    routes::{
        invalid_form,
        projects::{PROJECTS_PATH, project_path},
    },
    views,
};

const NEW_TASK_PATH: &str = "/tasks/add";

#[derive(Debug, Default, Deserialize)]
pub struct NewTaskQuery {
    pub project_id: Option<i64>,
}

/// Hidden `_method` field that lets plain HTML forms issue a DELETE.
#[derive(Debug, Default, Deserialize)]
pub struct MethodOverride {
    #[serde(default, rename = "_method")]
    pub method: String,
}

pub async fn new_task_form(
    State(state): State<AppState>,
    Query(query): Query<NewTaskQuery>,
) -> Result<Html<String>, ApiError> {
    let projects = Project::find_all(&state.db().pool).await?;
    let form = match query.project_id {
        Some(project_id) => TaskForm::for_project(project_id),
        None => TaskForm::default(),
    };

    Ok(Html(views::tasks::form(
        "New task",
        NEW_TASK_PATH,
        &form,
        &projects,
        &FieldErrors::new(),
    )))
}

pub async fn create_task(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Response, ApiError> {
    let pool = &state.db().pool;
    let projects = Project::find_all(pool).await?;

    let payload = match form.to_create(&projects) {
        Ok(payload) => payload,
        Err(errors) => {
            return Ok(invalid_form(views::tasks::form(
                "New task",
                NEW_TASK_PATH,
                &form,
                &projects,
                &errors,
            )));
        }
    };

    tracing::debug!(
        "Creating task '{}' in project {}",
        payload.task_name,
        payload.project_id
    );
    let task = Task::create(pool, &payload).await?;

    Ok(Redirect::to(&project_path(task.project_id)).into_response())
}

fn edit_form(task: &Task, form: &TaskForm, projects: &[Project], errors: &FieldErrors) -> String {
    views::tasks::form(
        &format!("Edit {}", task.task_name),
        &format!("/tasks/update/{}", task.id),
        form,
        projects,
        errors,
    )
}

pub async fn edit_task_form(
    Extension(task): Extension<Task>,
    State(state): State<AppState>,
) -> Result<Html<String>, ApiError> {
    let projects = Project::find_all(&state.db().pool).await?;
    Ok(Html(edit_form(
        &task,
        &TaskForm::from_task(&task),
        &projects,
        &FieldErrors::new(),
    )))
}

pub async fn update_task(
    Extension(existing_task): Extension<Task>,
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Response, ApiError> {
    let pool = &state.db().pool;
    let projects = Project::find_all(pool).await?;

    let payload = match form.to_update(&projects) {
        Ok(payload) => payload,
        Err(errors) => {
            return Ok(invalid_form(edit_form(
                &existing_task,
                &form,
                &projects,
                &errors,
            )));
        }
    };

    let task = Task::update(pool, existing_task.id, &payload).await?;
    Ok(Redirect::to(&project_path(task.project_id)).into_response())
}

pub async fn delete_task(
    Extension(task): Extension<Task>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Redirect, ApiError> {
    let rows_affected = Task::delete(&state.db().pool, task.id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Redirect::to(&referrer_target(&headers)))
}

pub async fn delete_task_via_form(
    extension: Extension<Task>,
    state: State<AppState>,
    headers: HeaderMap,
    Form(method_override): Form<MethodOverride>,
) -> Result<Redirect, ApiError> {
    if !method_override.method.trim().eq_ignore_ascii_case("DELETE") {
        return Err(ApiError::MethodNotAllowed(
            "Tasks can only be deleted with a DELETE request".to_string(),
        ));
    }

    delete_task(extension, state, headers).await
}

/// Host used to resolve relative referrers when the request has no `Host`.
const FALLBACK_HOST: &str = "taskboard.invalid";

/// Where to send the client after a delete: back to the page that issued it
/// when that page is on this site, the project list otherwise.
fn referrer_target(headers: &HeaderMap) -> String {
    let Some(referer) = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    else {
        return PROJECTS_PATH.to_string();
    };

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(FALLBACK_HOST);

    // Resolving against this site lets the url parser apply the same
    // normalization browsers do (`//host`, `/\host`, ...) before the host check.
    let Ok(base) = Url::parse(&format!("http://{host}/")) else {
        return PROJECTS_PATH.to_string();
    };

    match base.join(referer) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && same_authority(&url, &base) => {
            match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            }
        }
        _ => PROJECTS_PATH.to_string(),
    }
}

fn same_authority(url: &Url, site: &Url) -> bool {
    url.host_str().is_some()
        && url.host_str() == site.host_str()
        && url.port() == site.port()
}

pub fn router(state: &AppState) -> Router<AppState> {
    let task_id_router = Router::new()
        .route("/tasks/update/{id}", get(edit_task_form).post(update_task))
        .route(
            "/tasks/delete/{id}",
            delete(delete_task).post(delete_task_via_form),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            load_task_middleware::<AppState>,
        ));

    Router::new()
        .route(NEW_TASK_PATH, get(new_task_form).post(create_task))
        .merge(task_id_router)
}
