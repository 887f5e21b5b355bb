use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010008_create_attachments"
    }
}

/// Builds one attachment table. Follow-up and knowledge-base attachments share
/// the same shape and differ only in the owning table.
fn attachment_table(table: &str, owner_column: &str, owner_table: &str) -> TableCreateStatement {
    Table::create()
        .table(Alias::new(table))
        .if_not_exists()
        .col(
            ColumnDef::new(Alias::new("id"))
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Alias::new(owner_column)).big_integer().not_null())
        .col(ColumnDef::new(Alias::new("file")).string_len(255).not_null())
        .col(ColumnDef::new(Alias::new("filename")).string_len(1000).not_null())
        .col(ColumnDef::new(Alias::new("mime_type")).string_len(255).not_null())
        .col(ColumnDef::new(Alias::new("size")).big_integer().not_null())
        .col(
            ColumnDef::new(Alias::new("created_at"))
                .timestamp()
                .not_null()
                .default(Expr::cust("CURRENT_TIMESTAMP")),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Alias::new(table), Alias::new(owner_column))
                .to(Alias::new(owner_table), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(attachment_table(
                "followup_attachments",
                "followup_id",
                "follow_ups",
            ))
            .await?;

        manager
            .create_table(attachment_table("kbi_attachments", "kbitem_id", "kb_items"))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("kbi_attachments")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("followup_attachments")).to_owned())
            .await
    }
}
