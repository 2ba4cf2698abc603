//! Demo data: the sample skill catalog and one account per role.
//!
//! Existing records are left alone, so seeding on every start is safe.

use domain_learning::{AssignLearningPath, CreateLearningStep, LearningRepository};
use domain_scores::ScoreRepository;
use domain_skills::{CreateSkill, SkillError, SkillRepository};
use domain_users::{RegisterUser, User, UserError, UserRepository};
use tracing::info;

use crate::state::AppState;

pub const DEMO_PASSWORD: &str = "password123";

const SKILLS: [(&str, &str, &str); 6] = [
    ("JavaScript", "Programming", "Frontend programming language"),
    ("React", "Frontend", "JavaScript library for building user interfaces"),
    ("Python", "Programming", "Backend programming language"),
    ("FastAPI", "Backend", "Modern web framework for building APIs"),
    ("SQL", "Database", "Database query language"),
    ("Docker", "DevOps", "Containerization platform"),
];

struct DemoUser {
    email: &'static str,
    name: &'static str,
    role: &'static str,
    department: &'static str,
    experience: i32,
}

const USERS: [DemoUser; 4] = [
    DemoUser {
        email: "john.employee@company.com",
        name: "John Smith",
        role: "employee",
        department: "Engineering",
        experience: 3,
    },
    DemoUser {
        email: "sarah.trainer@company.com",
        name: "Sarah Johnson",
        role: "trainer",
        department: "Training",
        experience: 8,
    },
    DemoUser {
        email: "mike.manager@company.com",
        name: "Mike Wilson",
        role: "manager",
        department: "Management",
        experience: 12,
    },
    DemoUser {
        email: "admin@company.com",
        name: "System Administrator",
        role: "super-user",
        department: "IT Administration",
        experience: 15,
    },
];

pub async fn seed_demo_data<U, K, S, L>(state: &AppState<U, K, S, L>) -> eyre::Result<()>
where
    U: UserRepository,
    K: SkillRepository,
    S: ScoreRepository,
    L: LearningRepository,
{
    let mut created_skills = 0;
    for (name, category, description) in SKILLS {
        let result = state
            .skills
            .create(CreateSkill {
                name: name.to_string(),
                category: category.to_string(),
                description: Some(description.to_string()),
            })
            .await;

        match result {
            Ok(_) => created_skills += 1,
            Err(SkillError::DuplicateName(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let mut accounts: Vec<User> = Vec::new();
    for demo in &USERS {
        let result = state
            .users
            .register(RegisterUser {
                email: demo.email.to_string(),
                name: demo.name.to_string(),
                password: DEMO_PASSWORD.to_string(),
                role: demo.role.to_string(),
                avatar: None,
                department: Some(demo.department.to_string()),
                experience: Some(demo.experience),
            })
            .await;

        match result {
            Ok(user) => accounts.push(user),
            Err(UserError::DuplicateEmail(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    if let [employee, _, manager, ..] = accounts.as_slice() {
        seed_learning_path(state, employee, manager).await?;
    }

    info!(
        skills = created_skills,
        users = accounts.len(),
        "Demo data seeded (password: {})",
        DEMO_PASSWORD
    );
    Ok(())
}

async fn seed_learning_path<U, K, S, L>(
    state: &AppState<U, K, S, L>,
    employee: &User,
    manager: &User,
) -> eyre::Result<()>
where
    U: UserRepository,
    K: SkillRepository,
    S: ScoreRepository,
    L: LearningRepository,
{
    let path = state
        .learning
        .assign_path(AssignLearningPath {
            title: "Frontend foundations".to_string(),
            employee_id: employee.id,
            assigned_by: manager.id,
        })
        .await?;

    let steps = [
        ("JavaScript essentials", "course"),
        ("Build a React app", "project"),
    ];
    for (title, skill_type) in steps {
        state
            .learning
            .add_step(
                path.id,
                CreateLearningStep {
                    title: title.to_string(),
                    description: None,
                    skill_type: skill_type.to_string(),
                },
            )
            .await?;
    }
    Ok(())
}
