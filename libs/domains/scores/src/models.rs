use chrono::{DateTime, Utc};
use domain_users::UserResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A trainer's assessment of one employee on one skill.
///
/// The ids are plain references: the employee, skill or trainer may have
/// been deleted since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Score {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub skill_id: Uuid,
    pub trainer_id: Uuid,
    pub score: f64,
    pub feedback: Option<String>,
    /// When the assessment was recorded
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateScore {
    pub employee_id: Uuid,
    pub skill_id: Uuid,
    pub trainer_id: Uuid,
    pub score: f64,
    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateScore {
    pub score: Option<f64>,
    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
}

/// A score plus the names it points at; a name is `null` when its record
/// no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScoreWithDetails {
    #[serde(flatten)]
    pub score: Score,
    pub skill_name: Option<String>,
    pub trainer_name: Option<String>,
    pub employee_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeAverage {
    pub employee_id: Uuid,
    pub average_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeWithScores {
    #[serde(flatten)]
    pub employee: UserResponse,
    pub scores: Vec<Score>,
}

impl Score {
    pub fn new(input: CreateScore) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            employee_id: input.employee_id,
            skill_id: input.skill_id,
            trainer_id: input.trainer_id,
            score: input.score,
            feedback: input.feedback,
            date: now,
            created_at: now,
            updated_at: None,
        }
    }

    pub fn apply_update(&mut self, update: UpdateScore) {
        if let Some(score) = update.score {
            self.score = score;
        }
        if let Some(feedback) = update.feedback {
            self.feedback = Some(feedback);
        }
        self.updated_at = Some(Utc::now());
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn average(scores: &[Score]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().map(|s| s.score).sum::<f64>() / scores.len() as f64)
}
