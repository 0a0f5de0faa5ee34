use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{AppState, routes};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home::main_page))
        .route("/health", get(routes::health::health_check))
        .route("/assets/{*path}", get(routes::assets::serve_asset))
        .merge(routes::projects::router(&state))
        .merge(routes::tasks::router(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};
    use db::models::{
        project::{CreateProject, Project},
        task::{CreateTask, Task},
    };

    use crate::{
        forms::task::parse_due_date,
        test_support::{body_text, get, location, post_form, send, test_app},
    };

    async fn seed_project(db: &db::DBService, name: &str) -> Project {
        Project::create(
            &db.pool,
            &CreateProject {
                project_name: name.to_string(),
            },
        )
        .await
        .unwrap()
    }

    async fn seed_task(db: &db::DBService, project_id: i64, name: &str) -> Task {
        Task::create(
            &db.pool,
            &CreateTask {
                task_name: name.to_string(),
                due_date: parse_due_date("2025-01-10").unwrap(),
                project_id,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn main_page_and_health_render() {
        let (_state, app) = test_app().await;

        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Taskboard"));

        let response = get(&app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("ok"));
    }

    #[tokio::test]
    async fn stylesheet_is_served() {
        let (_state, app) = test_app().await;

        let response = get(&app, "/assets/app.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );

        assert_eq!(
            get(&app, "/assets/missing.js").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn valid_project_is_persisted_and_listed() {
        let (state, app) = test_app().await;

        let response = post_form(
            &app,
            "/projects/add",
            &[("project_name", "Website Redesign")],
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/projects");

        let projects = Project::find_all(&state.db().pool).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].project_name, "Website Redesign");

        let listing = body_text(get(&app, "/projects").await).await;
        assert_eq!(listing.matches("Website Redesign").count(), 1);
    }

    #[tokio::test]
    async fn invalid_project_names_are_rejected_without_persisting() {
        let (state, app) = test_app().await;
        let too_long = "x".repeat(256);

        for name in ["", "x", too_long.as_str()] {
            let response =
                post_form(&app, "/projects/add", &[("project_name", name)], None).await;
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body_text(response).await.contains("field-errors"));
        }

        assert_eq!(Project::count(&state.db().pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_project_changes_name_and_redirects_to_detail() {
        let (state, app) = test_app().await;
        let project = seed_project(state.db(), "Original").await;

        let edit_page = body_text(get(&app, &format!("/projects/update/{}", project.id)).await).await;
        assert!(edit_page.contains(r#"value="Original""#));

        let response = post_form(
            &app,
            &format!("/projects/update/{}", project.id),
            &[("project_name", "Renamed")],
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/projects/{}", project.id));

        let fetched = Project::find_by_id(&state.db().pool, project.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.project_name, "Renamed");
    }

    #[tokio::test]
    async fn invalid_project_update_keeps_original_name() {
        let (state, app) = test_app().await;
        let project = seed_project(state.db(), "Original").await;

        let response = post_form(
            &app,
            &format!("/projects/update/{}", project.id),
            &[("project_name", "x")],
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let fetched = Project::find_by_id(&state.db().pool, project.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.project_name, "Original");
    }

    #[tokio::test]
    async fn missing_entities_answer_not_found() {
        let (_state, app) = test_app().await;

        assert_eq!(get(&app, "/projects/99").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            get(&app, "/projects/update/99").await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get(&app, "/projects/delete/99").await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            send(&app, "DELETE", "/projects/delete/99", None).await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get(&app, "/tasks/update/99").await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            send(&app, "DELETE", "/tasks/delete/99", None).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn delete_project_removes_it_and_its_tasks() {
        let (state, app) = test_app().await;
        let project = seed_project(state.db(), "Short lived").await;
        let task = seed_task(state.db(), project.id, "Goes too").await;

        let response = get(&app, &format!("/projects/delete/{}", project.id)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/projects");

        let pool = &state.db().pool;
        assert!(Project::find_by_id(pool, project.id).await.unwrap().is_none());
        assert!(Task::find_by_id(pool, task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn task_form_offers_projects_by_name() {
        let (state, app) = test_app().await;
        let project = seed_project(state.db(), "Website Redesign").await;

        let page = body_text(get(&app, &format!("/tasks/add?project_id={}", project.id)).await).await;
        assert!(page.contains(&format!(
            r#"<option value="{}" selected>Website Redesign</option>"#,
            project.id
        )));
    }

    #[tokio::test]
    async fn incomplete_task_submissions_persist_nothing() {
        let (state, app) = test_app().await;
        let project = seed_project(state.db(), "Website Redesign").await;
        let project_id = project.id.to_string();

        let submissions = [
            [("task_name", ""), ("due_date", "2025-01-10T09:00"), ("project_id", project_id.as_str())],
            [("task_name", "Wireframes"), ("due_date", ""), ("project_id", project_id.as_str())],
            [("task_name", "Wireframes"), ("due_date", "2025-01-10T09:00"), ("project_id", "")],
        ];

        for submission in submissions {
            let response = post_form(&app, "/tasks/add", &submission, None).await;
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }

        assert!(Task::find_all(&state.db().pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_task_redirects_to_owning_project() {
        let (state, app) = test_app().await;
        let first = seed_project(state.db(), "First").await;
        let second = seed_project(state.db(), "Second").await;
        let task = seed_task(state.db(), first.id, "Draft").await;

        let second_id = second.id.to_string();
        let response = post_form(
            &app,
            &format!("/tasks/update/{}", task.id),
            &[
                ("task_name", "Final"),
                ("due_date", "2025-02-01T10:15"),
                ("project_id", second_id.as_str()),
            ],
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/projects/{}", second.id));

        let updated = Task::find_by_id(&state.db().pool, task.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.task_name, "Final");
        assert_eq!(updated.project_id, second.id);
    }

    #[tokio::test]
    async fn form_delete_requires_method_override() {
        let (state, app) = test_app().await;
        let project = seed_project(state.db(), "Owner").await;
        let task = seed_task(state.db(), project.id, "Keep me").await;
        let uri = format!("/tasks/delete/{}", task.id);

        let response = post_form(&app, &uri, &[], None).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(Task::find_by_id(&state.db().pool, task.id).await.unwrap().is_some());

        let referer = format!("/projects/{}", project.id);
        let response = post_form(&app, &uri, &[("_method", "DELETE")], Some(&referer)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), referer);
        assert!(Task::find_by_id(&state.db().pool, task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn project_task_lifecycle() {
        let (state, app) = test_app().await;

        let response = post_form(
            &app,
            "/projects/add",
            &[("project_name", "Website Redesign")],
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(body_text(get(&app, "/projects").await).await.contains("Website Redesign"));

        let project = Project::find_all(&state.db().pool).await.unwrap().remove(0);
        let project_id = project.id.to_string();
        let response = post_form(
            &app,
            "/tasks/add",
            &[
                ("task_name", "Wireframes"),
                ("due_date", "2025-01-10"),
                ("project_id", project_id.as_str()),
            ],
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let detail_path = format!("/projects/{}", project.id);
        assert_eq!(location(&response), detail_path);

        let detail = body_text(get(&app, &detail_path).await).await;
        assert!(detail.contains("Wireframes"));

        let task = Task::find_by_project_id(&state.db().pool, project.id)
            .await
            .unwrap()
            .remove(0);
        let response = send(
            &app,
            "DELETE",
            &format!("/tasks/delete/{}", task.id),
            Some(&detail_path),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), detail_path);

        assert!(Task::find_by_id(&state.db().pool, task.id).await.unwrap().is_none());
        let detail = body_text(get(&app, &detail_path).await).await;
        assert!(!detail.contains("Wireframes"));
    }
}
