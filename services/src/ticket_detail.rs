use crate::error::ServiceError;
use db::models::{
    custom_field::Model as CustomFieldModel,
    follow_up::Model as FollowUpModel,
    followup_attachment::Model as FollowUpAttachmentModel,
    queue::Model as QueueModel,
    ticket::Model as TicketModel,
    ticket_custom_field_value::Model as ValueModel,
};
use sea_orm::DatabaseConnection;

/// A follow-up together with its attachments.
#[derive(Debug, Clone)]
pub struct FollowUpEntry {
    pub follow_up: FollowUpModel,
    pub attachments: Vec<FollowUpAttachmentModel>,
}

/// Read-only view of a ticket for the detail page.
#[derive(Debug, Clone)]
pub struct TicketDetail {
    pub ticket: TicketModel,
    pub queue: Option<QueueModel>,
    /// Applicable custom fields in display order, each with its stored value
    /// (empty when never set).
    pub custom_values: Vec<(CustomFieldModel, String)>,
    /// Oldest first.
    pub follow_ups: Vec<FollowUpEntry>,
}

pub async fn load_detail(
    db: &DatabaseConnection,
    ticket_id: i64,
) -> Result<Option<TicketDetail>, ServiceError> {
    let Some(ticket) = TicketModel::get_by_id(db, ticket_id).await? else {
        return Ok(None);
    };

    let queue = QueueModel::get_by_id(db, ticket.queue_id).await?;

    let mut stored = ValueModel::map_for_ticket(db, ticket.id).await?;
    let custom_values = CustomFieldModel::for_queue(db, ticket.queue_id)
        .await?
        .into_iter()
        .map(|field| {
            let value = stored.remove(&field.id).unwrap_or_default();
            (field, value)
        })
        .collect();

    let follow_ups = FollowUpModel::for_ticket(db, ticket.id).await?;
    let ids: Vec<i64> = follow_ups.iter().map(|f| f.id).collect();
    let mut attachments = FollowUpAttachmentModel::for_followups(db, &ids).await?;

    let follow_ups = follow_ups
        .into_iter()
        .map(|follow_up| {
            let (mine, rest): (Vec<_>, Vec<_>) = attachments
                .drain(..)
                .partition(|a| a.followup_id == follow_up.id);
            attachments = rest;
            FollowUpEntry {
                follow_up,
                attachments: mine,
            }
        })
        .collect();

    Ok(Some(TicketDetail {
        ticket,
        queue,
        custom_values,
        follow_ups,
    }))
}
