pub mod m202510010001_create_users;
pub mod m202510010002_create_queues;
pub mod m202510010003_create_tickets;
pub mod m202510010004_create_custom_fields;
pub mod m202510010005_create_ticket_custom_field_values;
pub mod m202510010006_create_follow_ups;
pub mod m202510010007_create_kb_items;
pub mod m202510010008_create_attachments;
pub mod m202510060001_add_attachment_validator;
