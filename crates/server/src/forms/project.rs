use db::models::project::{CreateProject, Project, UpdateProject};
use serde::Deserialize;
use validator::Validate;

use super::{FieldErrors, present};

pub const PROJECT_NAME: &str = "project_name";

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub project_name: String,
}

/// Trimmed submission as checked by `validator`.
#[derive(Debug, Validate)]
struct ProjectInput {
    #[validate(
        required(message = "Please enter a project name"),
        length(min = 2, max = 255)
    )]
    project_name: Option<String>,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            project_name: project.project_name.clone(),
        }
    }

    fn validated_name(&self) -> Result<String, FieldErrors> {
        let input = ProjectInput {
            project_name: present(&self.project_name),
        };

        if let Err(errors) = input.validate() {
            let name = input.project_name.as_deref().unwrap_or_default();
            return Err(FieldErrors::from_validation(&errors, |_, _| {
                length_message(name)
            }));
        }

        Ok(input.project_name.unwrap_or_default())
    }

    pub fn to_create(&self) -> Result<CreateProject, FieldErrors> {
        self.validated_name()
            .map(|project_name| CreateProject { project_name })
    }

    pub fn to_update(&self) -> Result<UpdateProject, FieldErrors> {
        self.validated_name()
            .map(|project_name| UpdateProject { project_name })
    }
}

/// The length rule covers both bounds; the message names the one violated.
fn length_message(name: &str) -> String {
    if name.chars().count() > NAME_MAX_CHARS {
        format!(
            "The project name cannot be longer than {} characters",
            NAME_MAX_CHARS
        )
    } else {
        format!(
            "The project name must be at least {} characters long",
            NAME_MIN_CHARS
        )
    }
}
