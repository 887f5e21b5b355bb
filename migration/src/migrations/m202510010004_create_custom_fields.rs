use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010004_create_custom_fields"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("custom_fields"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("name"))
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Alias::new("label")).string_len(30).not_null())
                    .col(ColumnDef::new(Alias::new("help_text")).text())
                    .col(
                        ColumnDef::new(Alias::new("data_type"))
                            .enumeration(
                                Alias::new("custom_field_type"),
                                [
                                    "varchar",
                                    "text",
                                    "integer",
                                    "decimal",
                                    "list",
                                    "boolean",
                                    "date",
                                    "time",
                                    "datetime",
                                    "email",
                                    "url",
                                    "ipaddress",
                                    "slug",
                                ]
                                .into_iter()
                                .map(Alias::new),
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("max_length")).integer())
                    .col(ColumnDef::new(Alias::new("decimal_places")).integer())
                    .col(ColumnDef::new(Alias::new("list_values")).text())
                    .col(
                        ColumnDef::new(Alias::new("empty_selection_list"))
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Alias::new("required"))
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Alias::new("staff_only"))
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Alias::new("ordering")).integer())
                    .col(ColumnDef::new(Alias::new("queue_id")).big_integer())
                    .col(
                        ColumnDef::new(Alias::new("active"))
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("custom_fields"), Alias::new("queue_id"))
                            .to(Alias::new("queues"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("custom_fields")).to_owned())
            .await
    }
}
