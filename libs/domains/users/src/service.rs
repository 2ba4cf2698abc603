use axum_helpers::Pagination;
use domain_notifications::NotificationService;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::access::RoleGroup;
use crate::error::{UserError, UserResult};
use crate::models::{CreateMember, RegisterUser, Role, UpdateProfile, User};
use crate::password::hash_password;
use crate::repository::UserRepository;

/// Service layer for account business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    notifier: Option<NotificationService>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            notifier: self.notifier.clone(),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            notifier: None,
        }
    }

    /// Send welcome e-mails through `notifier` after registration.
    pub fn with_notifier(mut self, notifier: NotificationService) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Create an account. The welcome e-mail is best effort: a delivery
    /// failure is logged and the account stays created.
    pub async fn register(&self, input: RegisterUser) -> UserResult<User> {
        input.validate()?;

        let role: Role = input
            .role
            .parse()
            .map_err(|_| UserError::InvalidRole(input.role.clone()))?;

        let password_hash = hash_password(&input.password)?;
        let user = User::new(
            input.email,
            input.name,
            password_hash,
            role,
            input.avatar,
            input.department,
            input.experience,
        );

        let user = self.repository.create(user).await?;

        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier
                .send_welcome_email(&user.email, &user.name, &user.role.to_string())
                .await
            {
                tracing::warn!(
                    user_id = %user.id,
                    email = %user.email,
                    error = %e,
                    "Failed to send welcome email"
                );
            }
        }

        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> UserResult<User> {
        self.find(id).await?.ok_or(UserError::NotFound(id))
    }

    /// Any role; `None` when the id is unknown.
    pub async fn find(&self, id: Uuid) -> UserResult<Option<User>> {
        self.repository.get_by_id(id).await
    }

    /// Role-filtered view over the account store.
    pub fn directory(&self, directory: Directory) -> RoleDirectory<'_, R> {
        RoleDirectory {
            service: self,
            directory,
        }
    }
}

/// One role's slice of the account store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directory {
    Employees,
    Trainers,
    Managers,
}

impl Directory {
    pub const fn role(self) -> Role {
        match self {
            Directory::Employees => Role::Employee,
            Directory::Trainers => Role::Trainer,
            Directory::Managers => Role::Manager,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Directory::Employees => "Employee",
            Directory::Trainers => "Trainer",
            Directory::Managers => "Manager",
        }
    }

    /// Who may create, list, read, update and delete entries.
    pub const fn admin_group(self) -> RoleGroup {
        match self {
            Directory::Employees | Directory::Trainers => RoleGroup::ManagerOrSuperUser,
            Directory::Managers => RoleGroup::SuperUserOnly,
        }
    }

    /// Who may read their own profile through this directory.
    pub const fn self_group(self) -> Option<RoleGroup> {
        match self {
            Directory::Employees => Some(RoleGroup::EmployeeOnly),
            Directory::Trainers => Some(RoleGroup::TrainerOnly),
            Directory::Managers => None,
        }
    }
}

pub struct RoleDirectory<'a, R: UserRepository> {
    service: &'a UserService<R>,
    directory: Directory,
}

impl<R: UserRepository> RoleDirectory<'_, R> {
    fn role(&self) -> Role {
        self.directory.role()
    }

    pub async fn create(&self, input: CreateMember) -> UserResult<User> {
        self.service
            .register(input.into_registration(self.role()))
            .await
    }

    /// `None` when the id is unknown or belongs to another role.
    pub async fn find(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self
            .service
            .repository
            .get_by_id(id)
            .await?
            .filter(|u| u.role == self.role()))
    }

    pub async fn get(&self, id: Uuid) -> UserResult<User> {
        self.find(id)
            .await?
            .ok_or(UserError::MemberNotFound(self.directory, id))
    }

    pub async fn list(&self, page: Pagination) -> UserResult<Vec<User>> {
        self.service.repository.list(Some(self.role()), page).await
    }

    pub async fn update(&self, id: Uuid, patch: UpdateProfile) -> UserResult<User> {
        patch.validate()?;

        let mut user = self.get(id).await?;
        if patch.is_empty() {
            return Ok(user);
        }
        user.apply_profile(patch);
        self.service.repository.update(user).await
    }

    pub async fn delete(&self, id: Uuid) -> UserResult<()> {
        self.get(id).await?;

        if !self.service.repository.delete(id).await? {
            return Err(UserError::MemberNotFound(self.directory, id));
        }
        Ok(())
    }
}
