//! Caps the stored `file` path of follow-up and knowledge-base attachments at
//! 1000 characters.
//!
//! SQLite cannot change a column definition in place, so the cap is enforced
//! with `BEFORE INSERT` / `BEFORE UPDATE` triggers. Extension checks stay in the
//! application (`util::validators`) because the allow-list is configuration.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510060001_add_attachment_validator"
    }
}

const TABLES: [&str; 2] = ["followup_attachments", "kbi_attachments"];

fn trigger_sql(table: &str, event: &str) -> String {
    let when = event.to_ascii_lowercase();
    format!(
        "CREATE TRIGGER IF NOT EXISTS trg_{table}_file_len_{when} \
         BEFORE {event} ON {table} \
         FOR EACH ROW WHEN length(NEW.file) > 1000 \
         BEGIN SELECT RAISE(ABORT, '{table}.file exceeds 1000 characters'); END;"
    )
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in TABLES {
            for event in ["INSERT", "UPDATE"] {
                db.execute_unprepared(&trigger_sql(table, event)).await?;
            }
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in TABLES {
            for when in ["insert", "update"] {
                db.execute_unprepared(&format!(
                    "DROP TRIGGER IF EXISTS trg_{table}_file_len_{when};"
                ))
                .await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::trigger_sql;

    #[test]
    fn trigger_names_are_per_table_and_event() {
        let sql = trigger_sql("kbi_attachments", "UPDATE");
        assert!(sql.contains("trg_kbi_attachments_file_len_update"));
        assert!(sql.contains("BEFORE UPDATE ON kbi_attachments"));
        assert!(sql.contains("length(NEW.file) > 1000"));
    }
}
