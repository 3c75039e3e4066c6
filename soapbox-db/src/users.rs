use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue;
use sea_orm::ColumnTrait;
use sea_orm::EntityTrait;
use sea_orm::QueryFilter;
use sea_orm::Set;
use soapbox_api_types::Role;
use tracing::info;
use tracing::instrument;

use crate::entity::*;
use crate::SoapboxDb;
use anyhow::Result;

impl SoapboxDb {
    /// Inserts the built in admin account if no admin exists yet. The hash and
    /// salt are computed by the caller so this crate stays crypto free.
    pub async fn seed_default_admin(
        &self,
        username: &str,
        password_hash: String,
        password_salt: String,
    ) -> Result<()> {
        let existing = user::Entity::find()
            .filter(user::Column::Role.eq(Role::Admin.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_none() {
            let admin = user::Entity::insert(user::ActiveModel {
                id: ActiveValue::default(),
                username: Set(username.to_string()),
                password_hash: Set(password_hash),
                password_salt: Set(password_salt),
                role: Set(Role::Admin.as_str().to_string()),
            })
            .exec(&self.db)
            .await?;
            info!("Seeded admin account. id: {}", admin.last_insert_id);
        }
        Ok(())
    }

    #[instrument(skip(password_hash, password_salt))]
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: String,
        password_salt: String,
        role: Role,
    ) -> Result<user::Model> {
        Ok(user::ActiveModel {
            id: ActiveValue::default(),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            password_salt: Set(password_salt),
            role: Set(role.as_str().to_string()),
        }
        .insert(&self.db)
        .await?)
    }

    #[instrument]
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }
}
