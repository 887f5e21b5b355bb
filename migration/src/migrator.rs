use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510010001_create_users::Migration),
            Box::new(migrations::m202510010002_create_queues::Migration),
            Box::new(migrations::m202510010003_create_tickets::Migration),
            Box::new(migrations::m202510010004_create_custom_fields::Migration),
            Box::new(migrations::m202510010005_create_ticket_custom_field_values::Migration),
            Box::new(migrations::m202510010006_create_follow_ups::Migration),
            Box::new(migrations::m202510010007_create_kb_items::Migration),
            Box::new(migrations::m202510010008_create_attachments::Migration),
            Box::new(migrations::m202510060001_add_attachment_validator::Migration),
        ]
    }
}
