use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::Serialize;
use util::paths::kbi_attachment_path;

/// A file attached to a knowledge-base article.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "kbi_attachments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub kbitem_id: i64,
    /// Path relative to the attachment storage root. At most 1000 characters.
    pub file: String,
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::kb_item::Entity",
        from = "Column::KbitemId",
        to = "super::kb_item::Column::Id"
    )]
    KbItem,
}

impl Related<super::kb_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KbItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Records an attachment for an article. The stored path is derived from
    /// the article id and the sanitized upload name.
    pub async fn create(
        db: &DbConn,
        kbitem_id: i64,
        filename: &str,
        mime_type: &str,
        size: i64,
    ) -> Result<Model, DbErr> {
        let file = kbi_attachment_path(kbitem_id, filename);
        super::check_attachment(filename, &file)?;

        let active_model = ActiveModel {
            kbitem_id: Set(kbitem_id),
            file: Set(file),
            filename: Set(filename.to_owned()),
            mime_type: Set(mime_type.to_owned()),
            size: Set(size),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn for_item(db: &DbConn, kbitem_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::KbitemId.eq(kbitem_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }
}
