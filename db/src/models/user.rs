use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set};
use serde::Serialize;

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique login name.
    pub username: String,
    pub email: String,
    /// Argon2 PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Staff users may work on tickets.
    pub is_staff: bool,
    /// Inactive users cannot sign in and existing sessions stop working.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::follow_up::Entity")]
    FollowUps,
}

impl Related<super::follow_up::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FollowUps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a user, hashing `password` with Argon2.
    pub async fn create(
        db: &DbConn,
        username: &str,
        email: &str,
        password: &str,
        is_staff: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let password_hash = Self::hash_password(password)?;

        let active_model = ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash),
            is_staff: Set(is_staff),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn get_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn get_by_username(db: &DbConn, username: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await
    }

    /// Looks up an active user by username and checks the password.
    ///
    /// Returns `Ok(None)` for an unknown user, an inactive user or a wrong
    /// password; callers should not distinguish between these.
    pub async fn verify_credentials(
        db: &DbConn,
        username: &str,
        password: &str,
    ) -> Result<Option<Model>, DbErr> {
        let user = match Self::get_by_username(db, username).await? {
            Some(u) if u.is_active => u,
            _ => return Ok(None),
        };

        if user.verify_password(password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    pub async fn set_active(db: &DbConn, id: i64, is_active: bool) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.is_active = Set(is_active);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DbErr::Custom(format!("Failed to hash password: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::Model as UserModel;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn password_is_hashed_and_verifiable() {
        let db = setup_test_db().await;
        let user = UserModel::create(&db, "agent", "agent@example.com", "pass123", true)
            .await
            .unwrap();

        assert_ne!(user.password_hash, "pass123");
        assert!(user.verify_password("pass123"));
        assert!(!user.verify_password("wrong"));
    }

    #[tokio::test]
    async fn verify_credentials_rejects_inactive_and_wrong_password() {
        let db = setup_test_db().await;
        let user = UserModel::create(&db, "agent", "agent@example.com", "pass123", true)
            .await
            .unwrap();

        assert!(
            UserModel::verify_credentials(&db, "agent", "pass123")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            UserModel::verify_credentials(&db, "agent", "nope")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            UserModel::verify_credentials(&db, "ghost", "pass123")
                .await
                .unwrap()
                .is_none()
        );

        UserModel::set_active(&db, user.id, false).await.unwrap();
        assert!(
            UserModel::verify_credentials(&db, "agent", "pass123")
                .await
                .unwrap()
                .is_none()
        );
    }
}
