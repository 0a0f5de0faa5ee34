use db::models::project::Project;

use super::{escape, field_errors, layout};
use crate::forms::{
    FieldErrors, TaskForm,
    task::{DUE_DATE, PROJECT_ID, TASK_NAME},
};

fn project_options(projects: &[Project], selected: Option<i64>) -> String {
    let placeholder_selected = if selected.is_none() { " selected" } else { "" };
    let mut options = format!(r#"<option value=""{placeholder_selected}>Choose a project</option>"#);
    for project in projects {
        let is_selected = if selected == Some(project.id) {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            r#"<option value="{id}"{is_selected}>{name}</option>"#,
            id = project.id,
            name = escape(&project.project_name),
        ));
    }
    options
}

/// Create or edit form; the selector offers every project, labeled by name.
pub fn form(
    title: &str,
    action: &str,
    form: &TaskForm,
    projects: &[Project],
    errors: &FieldErrors,
) -> String {
    let body = format!(
        r#"<form method="post" action="{action}" novalidate>
<label for="task_name">Task name</label>
<input type="text" id="task_name" name="task_name" value="{task_name}" required>
{task_name_errors}
<label for="due_date">Due date</label>
<input type="datetime-local" id="due_date" name="due_date" value="{due_date}" required>
{due_date_errors}
<label for="project_id">Project</label>
<select id="project_id" name="project_id" required>{options}</select>
{project_errors}
<button type="submit">Save</button>
</form>"#,
        action = escape(action),
        task_name = escape(&form.task_name),
        task_name_errors = field_errors(errors, TASK_NAME),
        due_date = escape(&form.due_date),
        due_date_errors = field_errors(errors, DUE_DATE),
        options = project_options(projects, form.selected_project()),
        project_errors = field_errors(errors, PROJECT_ID),
    );

    layout(title, &body)
}
