use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010005_create_ticket_custom_field_values"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("ticket_custom_field_values"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("ticket_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("field_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("value")).text().not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("ticket_custom_field_values"), Alias::new("ticket_id"))
                            .to(Alias::new("tickets"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("ticket_custom_field_values"), Alias::new("field_id"))
                            .to(Alias::new("custom_fields"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_custom_field_values_unique")
                    .if_not_exists()
                    .table(Alias::new("ticket_custom_field_values"))
                    .col(Alias::new("ticket_id"))
                    .col(Alias::new("field_id"))
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("ticket_custom_field_values"))
                    .to_owned(),
            )
            .await
    }
}
