use axum::{
    Extension, Form, Router,
    extract::State,
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use db::models::{project::Project, task::Task};

use crate::{
    AppState,
    error::ApiError,
    forms::{FieldErrors, ProjectForm},
    middleware::load_project_middleware,
    routes::invalid_form,
    views,
};

pub const PROJECTS_PATH: &str = "/projects";

pub fn project_path(project_id: i64) -> String {
    format!("{PROJECTS_PATH}/{project_id}")
}

pub async fn list_projects(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let projects = Project::find_all(&state.db().pool).await?;
    Ok(Html(views::projects::list(&projects)))
}

pub async fn new_project_form() -> Html<String> {
    Html(views::projects::form(
        "New project",
        "/projects/add",
        &ProjectForm::default(),
        &FieldErrors::new(),
    ))
}

pub async fn create_project(
    State(state): State<AppState>,
    Form(form): Form<ProjectForm>,
) -> Result<Response, ApiError> {
    let data = match form.to_create() {
        Ok(data) => data,
        Err(errors) => {
            return Ok(invalid_form(views::projects::form(
                "New project",
                "/projects/add",
                &form,
                &errors,
            )));
        }
    };

    let project = Project::create(&state.db().pool, &data).await?;
    tracing::info!(project_id = project.id, "Project created");
    Ok(Redirect::to(PROJECTS_PATH).into_response())
}

pub async fn show_project(
    Extension(project): Extension<Project>,
    State(state): State<AppState>,
) -> Result<Html<String>, ApiError> {
    let tasks = Task::find_by_project_id(&state.db().pool, project.id).await?;
    Ok(Html(views::projects::detail(&project, &tasks)))
}

fn edit_form(project: &Project, form: &ProjectForm, errors: &FieldErrors) -> String {
    views::projects::form(
        &format!("Edit {}", project.project_name),
        &format!("/projects/update/{}", project.id),
        form,
        errors,
    )
}

pub async fn edit_project_form(Extension(project): Extension<Project>) -> Html<String> {
    Html(edit_form(
        &project,
        &ProjectForm::from_project(&project),
        &FieldErrors::new(),
    ))
}

pub async fn update_project(
    Extension(existing_project): Extension<Project>,
    State(state): State<AppState>,
    Form(form): Form<ProjectForm>,
) -> Result<Response, ApiError> {
    let payload = match form.to_update() {
        Ok(payload) => payload,
        Err(errors) => return Ok(invalid_form(edit_form(&existing_project, &form, &errors))),
    };

    let project = Project::update(&state.db().pool, existing_project.id, &payload).await?;
    Ok(Redirect::to(&project_path(project.id)).into_response())
}

pub async fn delete_project(
    Extension(project): Extension<Project>,
    State(state): State<AppState>,
) -> Result<Redirect, ApiError> {
    let rows_affected = Project::delete(&state.db().pool, project.id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    Ok(Redirect::to(PROJECTS_PATH))
}

pub fn router(state: &AppState) -> Router<AppState> {
    let project_id_router = Router::new()
        .route("/projects/{id}", get(show_project))
        .route(
            "/projects/update/{id}",
            get(edit_project_form).post(update_project),
        )
        .route(
            "/projects/delete/{id}",
            get(delete_project).delete(delete_project),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            load_project_middleware::<AppState>,
        ));

    Router::new()
        .route(PROJECTS_PATH, get(list_projects))
        .route("/projects/add", get(new_project_form).post(create_project))
        .merge(project_id_router)
}
