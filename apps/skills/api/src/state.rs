//! Application state.
//!
//! The services are generic over their stores so the same wiring serves the
//! Postgres backend and the in-memory one used in development and tests.

use axum_helpers::JwtAuth;
use domain_learning::{InMemoryLearningRepository, LearningRepository, LearningService};
use domain_notifications::{
    InMemoryNotificationRepository, InboxService, LogEmailProvider, NotificationConfig,
    NotificationResult, NotificationService,
};
use domain_scores::{InMemoryScoreRepository, ScoreRepository, ScoreService};
use domain_skills::{InMemorySkillRepository, SkillRepository, SkillService};
use domain_users::{Authenticator, InMemoryUserRepository, UserRepository, UserService};
use std::sync::Arc;

use crate::config::Config;

/// The domain services behind the HTTP surface.
pub struct AppState<U, K, S, L>
where
    U: UserRepository,
    K: SkillRepository,
    S: ScoreRepository,
    L: LearningRepository,
{
    pub users: UserService<U>,
    pub auth: Authenticator<U>,
    pub skills: SkillService<K>,
    pub scores: ScoreService<S, U, K>,
    pub learning: LearningService<L>,
    pub inbox: InboxService,
}

impl<U, K, S, L> Clone for AppState<U, K, S, L>
where
    U: UserRepository,
    K: SkillRepository,
    S: ScoreRepository,
    L: LearningRepository,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            auth: self.auth.clone(),
            skills: self.skills.clone(),
            scores: self.scores.clone(),
            learning: self.learning.clone(),
            inbox: self.inbox.clone(),
        }
    }
}

/// Stores for one backend.
pub struct Stores<U, K, S, L> {
    pub users: Arc<U>,
    pub skills: Arc<K>,
    pub scores: Arc<S>,
    pub learning: Arc<L>,
    pub inbox: InboxService,
}

pub type InMemoryStores = Stores<
    InMemoryUserRepository,
    InMemorySkillRepository,
    InMemoryScoreRepository,
    InMemoryLearningRepository,
>;

impl InMemoryStores {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            skills: Arc::new(InMemorySkillRepository::new()),
            scores: Arc::new(InMemoryScoreRepository::new()),
            learning: Arc::new(InMemoryLearningRepository::new()),
            inbox: InboxService::new(InMemoryNotificationRepository::new()),
        }
    }
}

impl<U, K, S, L> AppState<U, K, S, L>
where
    U: UserRepository,
    K: SkillRepository,
    S: ScoreRepository,
    L: LearningRepository,
{
    /// Wire the services. Account e-mails go through `LogEmailProvider`
    /// since no delivery backend is configured.
    pub fn new(stores: Stores<U, K, S, L>, config: &Config) -> NotificationResult<Self> {
        let notifier = NotificationService::new(
            Arc::new(LogEmailProvider),
            NotificationConfig::new(config.frontend_url.clone()),
        )?;
        let inbox = stores.inbox;
        let jwt = JwtAuth::new(&config.jwt);

        let users = UserService::new(stores.users.clone()).with_notifier(notifier.clone());
        let auth = Authenticator::new(stores.users, jwt).with_notifier(notifier);
        let skills = SkillService::new(stores.skills);
        let scores = ScoreService::new(stores.scores, users.clone(), skills.clone())
            .with_inbox(inbox.clone());
        let learning = LearningService::new(stores.learning).with_inbox(inbox.clone());

        Ok(Self {
            users,
            auth,
            skills,
            scores,
            learning,
            inbox,
        })
    }
}
