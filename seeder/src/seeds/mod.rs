pub mod custom_field;
pub mod kb_item;
pub mod queue;
pub mod ticket;
pub mod user;
