use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::Serialize;

/// A named bucket of tickets.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "queues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    /// Unique, URL-safe short name.
    pub slug: String,
    pub email_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ticket::Entity")]
    Tickets,
    #[sea_orm(has_many = "super::custom_field::Entity")]
    CustomFields,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl Related<super::custom_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomFields.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lowercase ASCII letters, digits, `-` and `_`; never empty.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

impl Model {
    pub async fn create(db: &DbConn, title: &str, slug: &str) -> Result<Model, DbErr> {
        if !is_valid_slug(slug) {
            return Err(DbErr::Custom(format!("Invalid queue slug: {slug:?}")));
        }

        let active_model = ActiveModel {
            title: Set(title.to_owned()),
            slug: Set(slug.to_owned()),
            email_address: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn get_by_slug(db: &DbConn, slug: &str) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Slug.eq(slug)).one(db).await
    }

    /// All queues, alphabetically.
    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::Title)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::{Model as QueueModel, is_valid_slug};
    use crate::test_utils::setup_test_db;

    #[test]
    fn slug_rules() {
        assert!(is_valid_slug("test"));
        assert!(is_valid_slug("first-line_2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Test Queue"));
        assert!(!is_valid_slug("a/b"));
    }

    #[tokio::test]
    async fn create_and_lookup_by_slug() {
        let db = setup_test_db().await;
        let queue = QueueModel::create(&db, "Test Queue", "test").await.unwrap();

        let found = QueueModel::get_by_slug(&db, "test").await.unwrap().unwrap();
        assert_eq!(found.id, queue.id);
        assert_eq!(found.title, "Test Queue");
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let db = setup_test_db().await;
        QueueModel::create(&db, "Test Queue", "test").await.unwrap();
        assert!(QueueModel::create(&db, "Other", "test").await.is_err());
    }

    #[tokio::test]
    async fn invalid_slug_is_rejected() {
        let db = setup_test_db().await;
        assert!(QueueModel::create(&db, "Bad", "Bad Slug").await.is_err());
    }
}
