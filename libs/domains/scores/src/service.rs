//! Score Service - recording, aggregation and the "with details" join

use axum_helpers::Pagination;
use domain_notifications::{CreateNotification, InboxService, NotificationKind};
use domain_skills::{SkillRepository, SkillService};
use domain_users::{Directory, UserRepository, UserService};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ScoreError, ScoreResult};
use crate::models::{
    CreateScore, EmployeeAverage, EmployeeWithScores, Score, ScoreWithDetails, UpdateScore,
    average,
};
use crate::repository::ScoreRepository;

pub struct ScoreService<S: ScoreRepository, U: UserRepository, K: SkillRepository> {
    scores: Arc<S>,
    users: UserService<U>,
    skills: SkillService<K>,
    inbox: Option<InboxService>,
}

impl<S, U, K> Clone for ScoreService<S, U, K>
where
    S: ScoreRepository,
    U: UserRepository,
    K: SkillRepository,
{
    fn clone(&self) -> Self {
        Self {
            scores: Arc::clone(&self.scores),
            users: self.users.clone(),
            skills: self.skills.clone(),
            inbox: self.inbox.clone(),
        }
    }
}

impl<S, U, K> ScoreService<S, U, K>
where
    S: ScoreRepository,
    U: UserRepository,
    K: SkillRepository,
{
    pub fn new(scores: Arc<S>, users: UserService<U>, skills: SkillService<K>) -> Self {
        Self {
            scores,
            users,
            skills,
            inbox: None,
        }
    }

    /// Leave an in-app notification for the employee on every new score.
    pub fn with_inbox(mut self, inbox: InboxService) -> Self {
        self.inbox = Some(inbox);
        self
    }

    /// Record a score. The referenced ids are not checked and the value is
    /// not range-limited.
    #[instrument(skip(self, input), fields(employee_id = %input.employee_id, skill_id = %input.skill_id))]
    pub async fn create(&self, input: CreateScore) -> ScoreResult<Score> {
        input.validate()?;

        let score = self.scores.create(Score::new(input)).await?;
        self.notify_employee(&score).await;
        Ok(score)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> ScoreResult<Score> {
        self.scores
            .get_by_id(id)
            .await?
            .ok_or(ScoreError::NotFound(id))
    }

    /// The score with skill, trainer and employee names. Each lookup is
    /// independent; a missing record leaves its name empty.
    #[instrument(skip(self))]
    pub async fn get_with_details(&self, id: Uuid) -> ScoreResult<ScoreWithDetails> {
        let score = self.get(id).await?;

        let skill = self.skills.find(score.skill_id).await?;
        let trainer = self.users.find(score.trainer_id).await?;
        let employee = self.users.find(score.employee_id).await?;

        Ok(ScoreWithDetails {
            score,
            skill_name: skill.map(|s| s.name),
            trainer_name: trainer.map(|u| u.name),
            employee_name: employee.map(|u| u.name),
        })
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: Pagination) -> ScoreResult<Vec<Score>> {
        self.scores.list(page).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_employee(&self, employee_id: Uuid) -> ScoreResult<Vec<Score>> {
        self.scores.list_by_employee(employee_id).await
    }

    #[instrument(skip(self))]
    pub async fn average_for_employee(&self, employee_id: Uuid) -> ScoreResult<EmployeeAverage> {
        let scores = self.scores.list_by_employee(employee_id).await?;
        let average_score = average(&scores).ok_or(ScoreError::NoScores(employee_id))?;

        Ok(EmployeeAverage {
            employee_id,
            average_score,
        })
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: Uuid, update: UpdateScore) -> ScoreResult<Score> {
        update.validate()?;

        let mut score = self.get(id).await?;
        score.apply_update(update);
        self.scores.update(score).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ScoreResult<()> {
        if !self.scores.delete(id).await? {
            return Err(ScoreError::NotFound(id));
        }
        Ok(())
    }

    /// An employee's profile together with all of their scores.
    #[instrument(skip(self))]
    pub async fn employee_with_scores(&self, employee_id: Uuid) -> ScoreResult<EmployeeWithScores> {
        let employee = self
            .users
            .directory(Directory::Employees)
            .get(employee_id)
            .await?;
        let scores = self.scores.list_by_employee(employee_id).await?;

        Ok(EmployeeWithScores {
            employee: employee.into(),
            scores,
        })
    }

    async fn notify_employee(&self, score: &Score) {
        let Some(inbox) = &self.inbox else {
            return;
        };

        let skill_name = match self.skills.find(score.skill_id).await {
            Ok(Some(skill)) => skill.name,
            _ => "a skill".to_string(),
        };

        let notification = CreateNotification {
            user_id: score.employee_id,
            kind: NotificationKind::Assessment,
            title: "New assessment".to_string(),
            message: format!("You received a score of {} for {}", score.score, skill_name),
        };

        if let Err(e) = inbox.notify(notification).await {
            tracing::warn!(
                score_id = %score.id,
                employee_id = %score.employee_id,
                error = %e,
                "Failed to record assessment notification"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryScoreRepository, MockScoreRepository};
    use domain_notifications::InMemoryNotificationRepository;
    use domain_skills::{CreateSkill, InMemorySkillRepository};
    use domain_users::{InMemoryUserRepository, RegisterUser, User, UserError};

    type Service = ScoreService<InMemoryScoreRepository, InMemoryUserRepository, InMemorySkillRepository>;

    struct Fixture {
        service: Service,
        users: UserService<InMemoryUserRepository>,
        skills: SkillService<InMemorySkillRepository>,
    }

    fn fixture() -> Fixture {
        let users = UserService::new(Arc::new(InMemoryUserRepository::new()));
        let skills = SkillService::new(Arc::new(InMemorySkillRepository::new()));
        let service = ScoreService::new(
            Arc::new(InMemoryScoreRepository::new()),
            users.clone(),
            skills.clone(),
        );
        Fixture {
            service,
            users,
            skills,
        }
    }

    async fn register(users: &UserService<InMemoryUserRepository>, name: &str, role: &str) -> User {
        users
            .register(RegisterUser {
                email: format!("{}@example.com", name.to_lowercase()),
                name: name.to_string(),
                password: "password123".to_string(),
                role: role.to_string(),
                avatar: None,
                department: None,
                experience: None,
            })
            .await
            .unwrap()
    }

    fn create(employee_id: Uuid, skill_id: Uuid, trainer_id: Uuid, score: f64) -> CreateScore {
        CreateScore {
            employee_id,
            skill_id,
            trainer_id,
            score,
            feedback: Some("Solid work".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_does_not_check_references() {
        let f = fixture();
        let created = f
            .service
            .create(create(Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7(), 11.5))
            .await
            .unwrap();

        assert_eq!(created.score, 11.5);
        assert_eq!(created.date, created.created_at);
        assert!(created.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_average_for_employee() {
        let f = fixture();
        let employee = Uuid::now_v7();
        for value in [3.0, 4.0, 5.0] {
            f.service
                .create(create(employee, Uuid::now_v7(), Uuid::now_v7(), value))
                .await
                .unwrap();
        }
        f.service
            .create(create(Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7(), 100.0))
            .await
            .unwrap();

        let average = f.service.average_for_employee(employee).await.unwrap();
        assert_eq!(average.employee_id, employee);
        assert_eq!(average.average_score, 4.0);
    }

    #[tokio::test]
    async fn test_average_without_scores() {
        let result = fixture().service.average_for_employee(Uuid::now_v7()).await;
        assert!(matches!(result, Err(ScoreError::NoScores(_))));
    }

    #[tokio::test]
    async fn test_details_tolerate_missing_records() {
        let f = fixture();
        let employee = register(&f.users, "Ada", "employee").await;
        let trainer = register(&f.users, "Sam", "trainer").await;
        let skill = f
            .skills
            .create(CreateSkill {
                name: "Rust".to_string(),
                category: "Programming".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let score = f
            .service
            .create(create(employee.id, skill.id, trainer.id, 4.0))
            .await
            .unwrap();

        let details = f.service.get_with_details(score.id).await.unwrap();
        assert_eq!(details.skill_name.as_deref(), Some("Rust"));
        assert_eq!(details.trainer_name.as_deref(), Some("Sam"));
        assert_eq!(details.employee_name.as_deref(), Some("Ada"));

        f.skills.delete(skill.id).await.unwrap();
        let details = f.service.get_with_details(score.id).await.unwrap();
        assert_eq!(details.skill_name, None);
        assert_eq!(details.trainer_name.as_deref(), Some("Sam"));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let f = fixture();
        let score = f
            .service
            .create(create(Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7(), 2.0))
            .await
            .unwrap();

        let updated = f
            .service
            .update(
                score.id,
                UpdateScore {
                    score: Some(3.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.score, 3.5);
        assert_eq!(updated.feedback.as_deref(), Some("Solid work"));
        assert!(updated.updated_at.is_some());

        f.service.delete(score.id).await.unwrap();
        assert!(matches!(f.service.delete(score.id).await, Err(ScoreError::NotFound(_))));
        assert!(matches!(f.service.get(score.id).await, Err(ScoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_employee_with_scores() {
        let f = fixture();
        let employee = register(&f.users, "Ada", "employee").await;
        let trainer = register(&f.users, "Sam", "trainer").await;
        f.service
            .create(create(employee.id, Uuid::now_v7(), trainer.id, 4.0))
            .await
            .unwrap();

        let view = f.service.employee_with_scores(employee.id).await.unwrap();
        assert_eq!(view.employee.id, employee.id);
        assert_eq!(view.scores.len(), 1);

        let result = f.service.employee_with_scores(trainer.id).await;
        assert!(matches!(
            result,
            Err(ScoreError::User(UserError::MemberNotFound(Directory::Employees, _)))
        ));
    }

    #[tokio::test]
    async fn test_new_score_notifies_employee() {
        let f = fixture();
        let inbox = InboxService::new(InMemoryNotificationRepository::new());
        let service = f.service.with_inbox(inbox.clone());
        let employee = Uuid::now_v7();

        service
            .create(create(employee, Uuid::now_v7(), Uuid::now_v7(), 4.0))
            .await
            .unwrap();

        let notifications = inbox.list_for_user(employee, Pagination::default()).await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Assessment);
        assert!(notifications[0].message.contains("a skill"));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut scores = MockScoreRepository::new();
        scores
            .expect_list_by_employee()
            .returning(|_| Err(ScoreError::Internal("connection reset".to_string())));

        let f = fixture();
        let service = ScoreService::new(Arc::new(scores), f.users, f.skills);

        let result = service.average_for_employee(Uuid::now_v7()).await;
        assert!(matches!(result, Err(ScoreError::Internal(_))));
    }
}
