use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::{Iterable, QueryOrder};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    pub queue_id: i64,
    pub submitter_email: Option<String>,
    pub priority: Priority,

    /// The ticket body.
    pub description: String,

    pub status: TicketStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TicketStatus {
    #[sea_orm(string_value = "open")]
    Open,

    #[sea_orm(string_value = "reopened")]
    Reopened,

    #[sea_orm(string_value = "resolved")]
    Resolved,

    #[sea_orm(string_value = "closed")]
    Closed,

    #[sea_orm(string_value = "duplicate")]
    Duplicate,
}

/// Ticket urgency. Lower numbers are more urgent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Priority {
    #[sea_orm(num_value = 1)]
    Critical,
    #[sea_orm(num_value = 2)]
    High,
    #[default]
    #[sea_orm(num_value = 3)]
    Normal,
    #[sea_orm(num_value = 4)]
    Low,
    #[sea_orm(num_value = 5)]
    VeryLow,
}

impl Priority {
    pub fn from_value(value: i32) -> Option<Self> {
        Self::iter().find(|p| p.to_value() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "1. Critical",
            Priority::High => "2. High",
            Priority::Normal => "3. Normal",
            Priority::Low => "4. Low",
            Priority::VeryLow => "5. Very Low",
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::queue::Entity",
        from = "Column::QueueId",
        to = "super::queue::Column::Id"
    )]
    Queue,

    #[sea_orm(has_many = "super::follow_up::Entity")]
    FollowUps,

    #[sea_orm(has_many = "super::ticket_custom_field_value::Entity")]
    CustomFieldValues,
}

impl Related<super::queue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Queue.def()
    }
}

impl Related<super::follow_up::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FollowUps.def()
    }
}

impl Related<super::ticket_custom_field_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomFieldValues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// The editable standard fields of a ticket, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketChanges {
    pub title: String,
    pub queue_id: i64,
    pub priority: Priority,
    pub description: String,
    pub submitter_email: Option<String>,
}

impl TicketChanges {
    /// Names of the fields that differ from `ticket`, in form order.
    pub fn changed_fields(&self, ticket: &Model) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.title != ticket.title {
            changed.push("title");
        }
        if self.queue_id != ticket.queue_id {
            changed.push("queue");
        }
        if self.priority != ticket.priority {
            changed.push("priority");
        }
        if self.description != ticket.description {
            changed.push("body");
        }
        if self.submitter_email != ticket.submitter_email {
            changed.push("submitter_email");
        }
        changed
    }
}

impl Model {
    pub async fn create(
        db: &DbConn,
        queue_id: i64,
        title: &str,
        submitter_email: Option<&str>,
        priority: Priority,
        description: &str,
    ) -> Result<Model, DbErr> {
        if title.trim().is_empty() {
            return Err(DbErr::Custom("Ticket title is required".to_string()));
        }

        let now = Utc::now();

        let active_model = ActiveModel {
            title: Set(title.to_owned()),
            queue_id: Set(queue_id),
            submitter_email: Set(submitter_email.map(str::to_owned)),
            priority: Set(priority),
            description: Set(description.to_owned()),
            status: Set(TicketStatus::Open),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Every ticket, newest first.
    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_desc(Column::Id).all(db).await
    }

    /// Writes validated standard-field changes to the ticket.
    pub async fn apply_changes<C: ConnectionTrait>(
        db: &C,
        ticket: Model,
        changes: TicketChanges,
    ) -> Result<Model, DbErr> {
        if changes.title.trim().is_empty() {
            return Err(DbErr::Custom("Ticket title is required".to_string()));
        }

        let mut active_model: ActiveModel = ticket.into();
        active_model.title = Set(changes.title);
        active_model.queue_id = Set(changes.queue_id);
        active_model.priority = Set(changes.priority);
        active_model.description = Set(changes.description);
        active_model.submitter_email = Set(changes.submitter_email);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }
}
