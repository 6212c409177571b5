// ABOUTME: SeaORM storage layer for users, role profiles, social links and packages
// ABOUTME: Runs migrations on startup and creates users with their role profile in one transaction

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use crate::entities::user::UserRole;
use crate::entities::{customer_profile, host_profile, package, user, user_profile_links};
use crate::entities::{CustomerProfile, HostProfile, Package, User, UserProfileLinks};
use crate::error::{AppError, Result};
use crate::migration::{self, Migrator};
use crate::password;
use crate::types::{CustomerProfileChanges, HostProfileChanges, NewPackage, NewUser, ProfileLinksInput};

pub type UserWithLinks = (user::Model, Option<user_profile_links::Model>);

/// Applies every pending step of `M` inside one transaction, so a step that
/// fails leaves neither its own DDL nor earlier steps of the batch behind.
pub async fn apply_migrations<M: MigratorTrait>(db: &DatabaseConnection) -> Result<()> {
    let txn = db.begin().await?;
    if let Err(err) = M::up(&txn, None).await {
        tracing::error!(error = %err, "Migration batch failed, rolling back");
        txn.rollback().await?;
        return Err(err.into());
    }
    txn.commit().await?;
    Ok(())
}

pub struct Storage {
    pub db: DatabaseConnection,
}

impl Storage {
    /// Connects and applies every pending migration step. A step that fails
    /// aborts startup.
    pub async fn new(database_url: &str) -> Result<Self> {
        migration::verify_plan(&migration::plan())?;

        let db = Database::connect(database_url).await?;
        apply_migrations::<Migrator>(&db).await?;
        tracing::info!("Database ready, migrations applied");

        Ok(Self { db })
    }

    /// Inserts the user and, for customers and hosts, an empty profile of the
    /// matching kind. Admins and guests get no profile.
    pub async fn create_user(&self, new_user: NewUser) -> Result<user::Model> {
        let plaintext = new_user.password.clone();
        let stored_password =
            tokio::task::spawn_blocking(move || password::make_password(plaintext.as_deref()))
                .await
                .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;

        let txn = self.db.begin().await?;

        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new_user.username),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            email: Set(new_user.email),
            password: Set(stored_password),
            role: Set(new_user.role),
            date_joined: Set(chrono::Utc::now().timestamp()),
        }
        .insert(&txn)
        .await?;

        match user.role {
            UserRole::Customer => {
                customer_profile::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user.id),
                    date_of_birth: Set(None),
                    phone_number: Set(String::new()),
                    avatar: Set(String::new()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
            UserRole::Host => {
                host_profile::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user.id),
                    company_name: Set(String::new()),
                    phone_number: Set(String::new()),
                    company_logo: Set(String::new()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
            UserRole::Admin | UserRole::Guest => {}
        }

        txn.commit().await?;

        tracing::info!(user_id = %user.id, role = user.role.as_str(), "Created user");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<UserWithLinks> {
        User::find_by_id(user_id)
            .find_also_related(UserProfileLinks)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))
    }

    pub async fn list_users(&self) -> Result<Vec<UserWithLinks>> {
        let users = User::find()
            .find_also_related(UserProfileLinks)
            .order_by_asc(user::Column::DateJoined)
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?;

        Ok(users)
    }

    /// Removes the user; profiles, links and hosted packages go with it
    /// through the foreign key cascades.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        let result = User::delete_by_id(user_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("User {}", user_id)));
        }

        tracing::info!(user_id = %user_id, "Deleted user");
        Ok(())
    }

    pub async fn set_profile_links(
        &self,
        user_id: Uuid,
        links: ProfileLinksInput,
    ) -> Result<user_profile_links::Model> {
        self.ensure_user_exists(user_id).await?;

        let existing = UserProfileLinks::find()
            .filter(user_profile_links::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        let saved = match existing {
            Some(model) => {
                let mut active: user_profile_links::ActiveModel = model.into();
                active.facebook = Set(links.facebook);
                active.twitter = Set(links.twitter);
                active.instagram = Set(links.instagram);
                active.update(&self.db).await?
            }
            None => {
                user_profile_links::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    facebook: Set(links.facebook),
                    twitter: Set(links.twitter),
                    instagram: Set(links.instagram),
                }
                .insert(&self.db)
                .await?
            }
        };

        Ok(saved)
    }

    pub async fn get_customer_profile(&self, user_id: Uuid) -> Result<customer_profile::Model> {
        CustomerProfile::find()
            .filter(customer_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer profile of user {}", user_id)))
    }

    pub async fn get_host_profile(&self, user_id: Uuid) -> Result<host_profile::Model> {
        HostProfile::find()
            .filter(host_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Host profile of user {}", user_id)))
    }

    pub async fn update_customer_profile(
        &self,
        user_id: Uuid,
        changes: CustomerProfileChanges,
    ) -> Result<customer_profile::Model> {
        let mut active: customer_profile::ActiveModel =
            self.get_customer_profile(user_id).await?.into();

        if let Some(date_of_birth) = changes.date_of_birth {
            active.date_of_birth = Set(Some(date_of_birth));
        }
        if let Some(phone_number) = changes.phone_number {
            active.phone_number = Set(phone_number);
        }
        if let Some(avatar) = changes.avatar {
            active.avatar = Set(avatar);
        }

        Ok(active.update(&self.db).await?)
    }

    pub async fn update_host_profile(
        &self,
        user_id: Uuid,
        changes: HostProfileChanges,
    ) -> Result<host_profile::Model> {
        let mut active: host_profile::ActiveModel = self.get_host_profile(user_id).await?.into();

        if let Some(company_name) = changes.company_name {
            active.company_name = Set(company_name);
        }
        if let Some(phone_number) = changes.phone_number {
            active.phone_number = Set(phone_number);
        }
        if let Some(company_logo) = changes.company_logo {
            active.company_logo = Set(company_logo);
        }

        Ok(active.update(&self.db).await?)
    }

    pub async fn create_package(&self, new_package: NewPackage) -> Result<package::Model> {
        let package = package::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_package.name),
            address: Set(new_package.address),
            description: Set(new_package.description),
            host_id: Set(new_package.host_id),
            created_at: Set(chrono::Utc::now().timestamp()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(package_id = %package.id, host_id = ?package.host_id, "Created package");
        Ok(package)
    }

    pub async fn get_packages_for_host(&self, host_id: Uuid) -> Result<Vec<package::Model>> {
        self.ensure_user_exists(host_id).await?;

        let packages = Package::find()
            .filter(package::Column::HostId.eq(host_id))
            .order_by_asc(package::Column::CreatedAt)
            .order_by_asc(package::Column::Name)
            .all(&self.db)
            .await?;

        Ok(packages)
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> Result<()> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))
    }
}
