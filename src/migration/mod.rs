// ABOUTME: SeaORM migration module holding the ordered schema history
// ABOUTME: Each step declares the steps it depends on and the plan is checked before applying

use std::collections::HashSet;

use sea_orm_migration::prelude::*;

pub mod m20250101_000001_create_users;
pub mod m20250101_000002_create_user_profile_links;
pub mod m20250101_000003_create_user_profiles;
pub mod m20250102_000001_create_packages;
pub mod m20250225_000005_split_user_profiles;
pub mod m20250305_000002_add_package_host;

/// Step that creates the table used as the identity model. Stands in for the
/// deployment's identity-model setting; `users` is the only identity model
/// here. Steps that relate other tables to users depend on this name rather
/// than a fixed step.
pub const IDENTITY_MODEL: &str = "m20250101_000001_create_users";

/// A migration together with the names of the steps it requires.
pub struct Step {
    pub migration: Box<dyn MigrationTrait>,
    pub depends_on: &'static [&'static str],
}

impl Step {
    fn new<M: MigrationTrait + 'static>(migration: M, depends_on: &'static [&'static str]) -> Self {
        Self {
            migration: Box::new(migration),
            depends_on,
        }
    }

    pub fn name(&self) -> &str {
        self.migration.name()
    }
}

pub fn plan() -> Vec<Step> {
    vec![
        Step::new(
            m20250101_000001_create_users::Migration,
            m20250101_000001_create_users::DEPENDS_ON,
        ),
        Step::new(
            m20250101_000002_create_user_profile_links::Migration,
            m20250101_000002_create_user_profile_links::DEPENDS_ON,
        ),
        Step::new(
            m20250101_000003_create_user_profiles::Migration,
            m20250101_000003_create_user_profiles::DEPENDS_ON,
        ),
        Step::new(
            m20250102_000001_create_packages::Migration,
            m20250102_000001_create_packages::DEPENDS_ON,
        ),
        Step::new(
            m20250225_000005_split_user_profiles::Migration,
            m20250225_000005_split_user_profiles::DEPENDS_ON,
        ),
        Step::new(
            m20250305_000002_add_package_host::Migration,
            m20250305_000002_add_package_host::DEPENDS_ON,
        ),
    ]
}

/// Rejects a plan where a step is declared twice or depends on a step that
/// is not declared before it.
pub fn verify_plan(steps: &[Step]) -> Result<(), DbErr> {
    let mut declared: HashSet<&str> = HashSet::new();

    for step in steps {
        for dependency in step.depends_on {
            if !declared.contains(dependency) {
                return Err(DbErr::Migration(format!(
                    "{} depends on {} which is not applied before it",
                    step.name(),
                    dependency
                )));
            }
        }

        if !declared.insert(step.name()) {
            return Err(DbErr::Migration(format!(
                "{} is declared more than once",
                step.name()
            )));
        }
    }

    Ok(())
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        plan().into_iter().map(|step| step.migration).collect()
    }
}
