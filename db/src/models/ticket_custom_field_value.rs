use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{QueryOrder, Set};
use serde::Serialize;
use std::collections::HashMap;

/// A stored custom-field value for one ticket. Unique per (ticket, field).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "ticket_custom_field_values")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ticket_id: i64,
    pub field_id: i64,
    /// Canonical string form of the value; empty when unset.
    pub value: String,
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
        belongs_to = "super::custom_field::Entity",
        from = "Column::FieldId",
        to = "super::custom_field::Column::Id"
    )]
    Field,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl Related<super::custom_field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Field.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn for_ticket<C: ConnectionTrait>(db: &C, ticket_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TicketId.eq(ticket_id))
            .order_by_asc(Column::FieldId)
            .all(db)
            .await
    }

    /// Stored values for a ticket keyed by field id.
    pub async fn map_for_ticket<C: ConnectionTrait>(
        db: &C,
        ticket_id: i64,
    ) -> Result<HashMap<i64, String>, DbErr> {
        Ok(Self::for_ticket(db, ticket_id)
            .await?
            .into_iter()
            .map(|v| (v.field_id, v.value))
            .collect())
    }

    /// Inserts or replaces the value for (`ticket_id`, `field_id`).
    pub async fn upsert<C: ConnectionTrait>(
        db: &C,
        ticket_id: i64,
        field_id: i64,
        value: &str,
    ) -> Result<(), DbErr> {
        let active_model = ActiveModel {
            ticket_id: Set(ticket_id),
            field_id: Set(field_id),
            value: Set(value.to_owned()),
            ..Default::default()
        };

        Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([Column::TicketId, Column::FieldId])
                    .update_column(Column::Value)
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }
}
