pub mod custom_field;
pub mod follow_up;
pub mod followup_attachment;
pub mod kb_item;
pub mod kbi_attachment;
pub mod queue;
pub mod ticket;
pub mod ticket_custom_field_value;
pub mod user;

pub use custom_field::Entity as CustomField;
pub use follow_up::Entity as FollowUp;
pub use followup_attachment::Entity as FollowUpAttachment;
pub use kb_item::Entity as KbItem;
pub use kbi_attachment::Entity as KbiAttachment;
pub use queue::Entity as Queue;
pub use ticket::Entity as Ticket;
pub use ticket_custom_field_value::Entity as TicketCustomFieldValue;
pub use user::Entity as User;

use sea_orm::DbErr;
use util::validators::{
    validate_attachment_name, validate_attachment_path, validate_file_extension,
};

/// Write-time check shared by both attachment tables: the original filename
/// must carry an allowed extension and a storable name, and the stored path
/// must fit the column.
pub(crate) fn check_attachment(filename: &str, file: &str) -> Result<(), DbErr> {
    validate_file_extension(filename).map_err(|e| DbErr::Custom(e.to_string()))?;
    validate_attachment_name(filename).map_err(|e| DbErr::Custom(e.to_string()))?;
    validate_attachment_path(file).map_err(|e| DbErr::Custom(e.to_string()))?;
    Ok(())
}
