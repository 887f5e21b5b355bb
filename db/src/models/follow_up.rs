use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::Serialize;

/// One entry in a ticket's history.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "follow_ups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ticket_id: i64,
    /// Staff member who made the change; `None` once the user is deleted.
    pub user_id: Option<i64>,
    pub title: String,
    pub comment: String,
    /// Visible to the submitter.
    pub public: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ticket::Entity",
        from = "Column::TicketId",
        to = "super::ticket::Column::Id"
    )]
    Ticket,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(has_many = "super::followup_attachment::Entity")]
    Attachments,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::followup_attachment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        ticket_id: i64,
        user_id: Option<i64>,
        title: &str,
        comment: &str,
        public: bool,
    ) -> Result<Model, DbErr> {
        let active_model = ActiveModel {
            ticket_id: Set(ticket_id),
            user_id: Set(user_id),
            title: Set(title.to_owned()),
            comment: Set(comment.to_owned()),
            public: Set(public),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// Follow-ups for a ticket, oldest first.
    pub async fn for_ticket<C: ConnectionTrait>(db: &C, ticket_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TicketId.eq(ticket_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::Model as FollowUpModel;
    use crate::models::queue::Model as QueueModel;
    use crate::models::ticket::{Model as TicketModel, Priority};
    use crate::models::user::Model as UserModel;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn follow_ups_are_listed_oldest_first() {
        let db = setup_test_db().await;
        let queue = QueueModel::create(&db, "Test Queue", "test").await.unwrap();
        let ticket = TicketModel::create(&db, queue.id, "Sample ticket", None, Priority::Normal, "")
            .await
            .unwrap();
        let staff = UserModel::create(&db, "staff", "staff@example.com", "secret", true)
            .await
            .unwrap();

        let first = FollowUpModel::create(&db, ticket.id, Some(staff.id), "Updated", "", false)
            .await
            .unwrap();
        let second = FollowUpModel::create(&db, ticket.id, None, "Comment", "hello", true)
            .await
            .unwrap();

        let listed = FollowUpModel::for_ticket(&db, ticket.id).await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(listed[0].user_id, Some(staff.id));
        assert!(listed[1].public);
    }
}
