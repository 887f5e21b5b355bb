use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::Serialize;

/// A file uploaded alongside a follow-up.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "followup_attachments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub followup_id: i64,
    /// Path relative to the attachment storage root. At most 1000 characters.
    pub file: String,
    /// Original upload name.
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::follow_up::Entity",
        from = "Column::FollowupId",
        to = "super::follow_up::Column::Id"
    )]
    FollowUp,
}

impl Related<super::follow_up::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FollowUp.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Records an attachment. The extension of `filename` and the length of
    /// `file` are checked before anything is written.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        followup_id: i64,
        file: &str,
        filename: &str,
        mime_type: &str,
        size: i64,
    ) -> Result<Model, DbErr> {
        super::check_attachment(filename, file)?;

        let active_model = ActiveModel {
            followup_id: Set(followup_id),
            file: Set(file.to_owned()),
            filename: Set(filename.to_owned()),
            mime_type: Set(mime_type.to_owned()),
            size: Set(size),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn for_followups<C: ConnectionTrait>(
        db: &C,
        followup_ids: &[i64],
    ) -> Result<Vec<Model>, DbErr> {
        if followup_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::FollowupId.is_in(followup_ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }
}
