use chrono::{NaiveDate, NaiveDateTime};
use db::models::{
    project::Project,
    task::{CreateTask, Task, UpdateTask},
};
use serde::Deserialize;
use validator::Validate;

use super::{FieldErrors, normalize, present};

pub const TASK_NAME: &str = "task_name";
pub const DUE_DATE: &str = "due_date";
pub const PROJECT_ID: &str = "project_id";

/// Format used by `<input type="datetime-local">`.
pub const DUE_DATE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const DATE_TIME_FORMATS: [&str; 3] = [
    DUE_DATE_INPUT_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    pub task_name: String,
    pub due_date: String,
    pub project_id: String,
}

/// Trimmed submission as checked by `validator`; parsing and the project
/// lookup run afterwards on the fields that are present.
#[derive(Debug, Validate)]
struct TaskInput {
    #[validate(required(message = "Please enter a task name"))]
    task_name: Option<String>,
    #[validate(required(message = "Please enter a due date"))]
    due_date: Option<String>,
    #[validate(required(message = "Please select a project"))]
    project_id: Option<String>,
}

struct ValidTask {
    task_name: String,
    due_date: NaiveDateTime,
    project_id: i64,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_name: task.task_name.clone(),
            due_date: format_due_date_input(&task.due_date),
            project_id: task.project_id.to_string(),
        }
    }

    /// Empty form with the project selector preset.
    pub fn for_project(project_id: i64) -> Self {
        Self {
            project_id: project_id.to_string(),
            ..Self::default()
        }
    }

    pub fn selected_project(&self) -> Option<i64> {
        normalize(&self.project_id).parse().ok()
    }

    /// Validates against the projects offered by the selector.
    fn validate(&self, projects: &[Project]) -> Result<ValidTask, FieldErrors> {
        let input = TaskInput {
            task_name: present(&self.task_name),
            due_date: present(&self.due_date),
            project_id: present(&self.project_id),
        };

        let mut errors = match input.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => FieldErrors::from_validation(&errors, |field, error| {
                format!("Invalid {field}: {}", error.code)
            }),
        };

        let due_date = input.due_date.as_deref().and_then(|raw| {
            let parsed = parse_due_date(raw);
            if parsed.is_none() {
                errors.add(DUE_DATE, "Please enter a valid due date");
            }
            parsed
        });

        let project_id = input.project_id.as_deref().and_then(|raw| {
            let selected = raw
                .parse::<i64>()
                .ok()
                .filter(|id| projects.iter().any(|project| project.id == *id));
            if selected.is_none() {
                errors.add(PROJECT_ID, "Please select a valid project");
            }
            selected
        });

        match (input.task_name, due_date, project_id) {
            (Some(task_name), Some(due_date), Some(project_id)) if errors.is_empty() => {
                Ok(ValidTask {
                    task_name,
                    due_date,
                    project_id,
                })
            }
            _ => Err(errors),
        }
    }

    pub fn to_create(&self, projects: &[Project]) -> Result<CreateTask, FieldErrors> {
        self.validate(projects).map(|valid| CreateTask {
            task_name: valid.task_name,
            due_date: valid.due_date,
            project_id: valid.project_id,
        })
    }

    pub fn to_update(&self, projects: &[Project]) -> Result<UpdateTask, FieldErrors> {
        self.validate(projects).map(|valid| UpdateTask {
            task_name: valid.task_name,
            due_date: valid.due_date,
            project_id: valid.project_id,
        })
    }
}

/// Accepts the `datetime-local` format, with or without seconds, and plain
/// dates (taken as midnight).
pub fn parse_due_date(raw: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn format_due_date_input(due_date: &NaiveDateTime) -> String {
    due_date.format(DUE_DATE_INPUT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects() -> Vec<Project> {
        vec![Project {
            id: 1,
            project_name: "Website Redesign".to_string(),
        }]
    }

    fn form(task_name: &str, due_date: &str, project_id: &str) -> TaskForm {
        TaskForm {
            task_name: task_name.to_string(),
            due_date: due_date.to_string(),
            project_id: project_id.to_string(),
        }
    }

    #[test]
    fn valid_submission_produces_draft() {
        let draft = form(" Wireframes ", "2025-01-10T14:30", "1")
            .to_create(&projects())
            .unwrap();

        assert_eq!(draft.task_name, "Wireframes");
        assert_eq!(draft.project_id, 1);
        assert_eq!(
            draft.due_date,
            NaiveDate::from_ymd_opt(2025, 1, 10)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn each_missing_field_is_reported() {
        let errors = form("", "", "").to_create(&projects()).unwrap_err();

        assert_eq!(errors.field(TASK_NAME), ["Please enter a task name"]);
        assert_eq!(errors.field(DUE_DATE), ["Please enter a due date"]);
        assert_eq!(errors.field(PROJECT_ID), ["Please select a project"]);
    }

    #[test]
    fn missing_single_field_rejects_submission() {
        let all = projects();
        assert!(form("", "2025-01-10", "1").to_create(&all).is_err());
        assert!(form("Wireframes", "", "1").to_create(&all).is_err());
        assert!(form("Wireframes", "2025-01-10", "").to_create(&all).is_err());
    }

    #[test]
    fn unknown_project_and_bad_date_are_invalid() {
        let errors = form("Wireframes", "next tuesday", "42")
            .to_update(&projects())
            .unwrap_err();

        assert_eq!(errors.field(DUE_DATE), ["Please enter a valid due date"]);
        assert_eq!(errors.field(PROJECT_ID), ["Please select a valid project"]);
        assert!(errors.field(TASK_NAME).is_empty());
    }

    #[test]
    fn parses_supported_date_formats() {
        let midnight = NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_due_date("2025-01-10"), Some(midnight));
        assert_eq!(parse_due_date("2025-01-10T00:00"), Some(midnight));
        assert_eq!(parse_due_date("2025-01-10T00:00:00"), Some(midnight));
        assert_eq!(parse_due_date("2025-01-10 00:00:00"), Some(midnight));
        assert_eq!(parse_due_date("10/01/2025"), None);
        assert_eq!(format_due_date_input(&midnight), "2025-01-10T00:00");
    }
}
