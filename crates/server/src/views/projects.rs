use db::models::{project::Project, task::Task};

use super::{escape, field_errors, layout};
use crate::forms::{FieldErrors, ProjectForm, project::PROJECT_NAME};

const DUE_DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn list(projects: &[Project]) -> String {
    let body = if projects.is_empty() {
        r#"<p class="empty">No projects yet. <a href="/projects/add">Create the first one</a>.</p>"#
            .to_string()
    } else {
        let rows: String = projects
            .iter()
            .map(|project| {
                format!(
                    r#"<li><a href="/projects/{id}">{name}</a></li>"#,
                    id = project.id,
                    name = escape(&project.project_name)
                )
            })
            .collect();
        format!(r#"<ul class="projects">{rows}</ul>"#)
    };

    layout("Projects", &body)
}

pub fn detail(project: &Project, tasks: &[Task]) -> String {
    let tasks_html = if tasks.is_empty() {
        r#"<p class="empty">No tasks yet.</p>"#.to_string()
    } else {
        let rows: String = tasks
            .iter()
            .map(|task| {
                format!(
                    r#"<tr>
<td>{name}</td>
<td><time datetime="{due_iso}">{due}</time></td>
<td><a href="/tasks/update/{id}">Edit</a></td>
<td><form method="post" action="/tasks/delete/{id}"><input type="hidden" name="_method" value="DELETE"><button type="submit">Delete</button></form></td>
</tr>"#,
                    id = task.id,
                    name = escape(&task.task_name),
                    due_iso = task.due_date.format("%Y-%m-%dT%H:%M:%S"),
                    due = task.due_date.format(DUE_DATE_DISPLAY_FORMAT),
                )
            })
            .collect();
        format!(
            r#"<table class="tasks">
<thead><tr><th>Task</th><th>Due</th><th></th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
        )
    };

    let body = format!(
        r#"<section class="actions">
<a href="/projects/update/{id}">Edit project</a>
<a href="/tasks/add?project_id={id}">Add task</a>
<a href="/projects/delete/{id}" class="danger">Delete project</a>
</section>
<h2>Tasks</h2>
{tasks_html}"#,
        id = project.id,
    );

    layout(&project.project_name, &body)
}

/// Create or edit form; `action` is the URL the form posts back to.
pub fn form(title: &str, action: &str, form: &ProjectForm, errors: &FieldErrors) -> String {
    let body = format!(
        r#"<form method="post" action="{action}" novalidate>
<label for="project_name">Project name</label>
<input type="text" id="project_name" name="project_name" value="{value}" required minlength="2" maxlength="255">
{errors}
<button type="submit">Save</button>
</form>"#,
        action = escape(action),
        value = escape(&form.project_name),
        errors = field_errors(errors, PROJECT_NAME),
    );

    layout(title, &body)
}
