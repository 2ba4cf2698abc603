use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A sequence of steps a manager assigns to an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LearningPath {
    pub id: Uuid,
    pub title: String,
    pub employee_id: Uuid,
    /// The user who assigned the path
    pub assigned_by: Uuid,
    pub assigned_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignLearningPath {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub employee_id: Uuid,
    pub assigned_by: Uuid,
}

/// Request body for assigning a path; the assigner is the caller.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewLearningPath {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub employee_id: Uuid,
}

impl NewLearningPath {
    pub fn assigned_by(self, assigned_by: Uuid) -> AssignLearningPath {
        AssignLearningPath {
            title: self.title,
            employee_id: self.employee_id,
            assigned_by,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LearningStep {
    pub id: Uuid,
    pub learning_path_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Free text, e.g. "course" or "workshop"
    pub skill_type: String,
    pub completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLearningStep {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub skill_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateLearningStep {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// A path with its steps and the completed share, from 0.0 to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LearningPathWithSteps {
    #[serde(flatten)]
    pub path: LearningPath,
    pub steps: Vec<LearningStep>,
    pub progress: f64,
}

impl LearningPath {
    pub fn new(input: AssignLearningPath) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            employee_id: input.employee_id,
            assigned_by: input.assigned_by,
            assigned_date: now,
            created_at: now,
            updated_at: None,
        }
    }
}

impl LearningStep {
    pub fn new(learning_path_id: Uuid, input: CreateLearningStep) -> Self {
        Self {
            id: Uuid::now_v7(),
            learning_path_id,
            title: input.title,
            description: input.description,
            skill_type: input.skill_type,
            completed: false,
            completed_date: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Completing stamps `completed_date`; un-completing clears it.
    pub fn apply_update(&mut self, update: UpdateLearningStep) {
        let now = Utc::now();
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        match update.completed {
            Some(true) if !self.completed => {
                self.completed = true;
                self.completed_date = Some(now);
            }
            Some(false) => {
                self.completed = false;
                self.completed_date = None;
            }
            _ => {}
        }
        self.updated_at = Some(now);
    }
}

impl LearningPathWithSteps {
    pub fn new(path: LearningPath, steps: Vec<LearningStep>) -> Self {
        let progress = if steps.is_empty() {
            0.0
        } else {
            steps.iter().filter(|s| s.completed).count() as f64 / steps.len() as f64
        };
        Self {
            path,
            steps,
            progress,
        }
    }
}
