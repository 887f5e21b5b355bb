//! Runtime-defined extra ticket fields.
//!
//! A field with `queue_id = NULL` applies to every queue; otherwise it only
//! applies to tickets in that queue. The workflow fetches the applicable list
//! per request and merges it into the form schema.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::NullOrdering;
use sea_orm::{Condition, Order, QueryOrder, Select, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "custom_fields")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Unique key used in form data.
    pub name: String,
    /// Display text.
    pub label: String,
    pub help_text: Option<String>,
    pub data_type: CustomFieldType,

    pub max_length: Option<i32>,
    pub decimal_places: Option<i32>,
    /// Newline separated choices for `list` fields.
    pub list_values: Option<String>,
    /// Offer a blank first choice for `list` fields.
    pub empty_selection_list: bool,

    pub required: bool,
    pub staff_only: bool,
    /// Display order; fields without one sort after all ordered fields.
    pub ordering: Option<i32>,
    pub queue_id: Option<i64>,
    pub active: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "custom_field_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CustomFieldType {
    #[sea_orm(string_value = "varchar")]
    Varchar,
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "integer")]
    Integer,
    #[sea_orm(string_value = "decimal")]
    Decimal,
    #[sea_orm(string_value = "list")]
    List,
    #[sea_orm(string_value = "boolean")]
    Boolean,
    #[sea_orm(string_value = "date")]
    Date,
    #[sea_orm(string_value = "time")]
    Time,
    #[sea_orm(string_value = "datetime")]
    Datetime,
    #[sea_orm(string_value = "email")]
    Email,
    #[sea_orm(string_value = "url")]
    Url,
    #[sea_orm(string_value = "ipaddress")]
    Ipaddress,
    #[sea_orm(string_value = "slug")]
    Slug,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::queue::Entity",
        from = "Column::QueueId",
        to = "super::queue::Column::Id"
    )]
    Queue,

    #[sea_orm(has_many = "super::ticket_custom_field_value::Entity")]
    Values,
}

impl Related<super::queue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Queue.def()
    }
}

impl Related<super::ticket_custom_field_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Values.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Parameters for [`Model::create`].
#[derive(Debug, Clone)]
pub struct NewCustomField {
    pub name: String,
    pub label: String,
    pub data_type: CustomFieldType,
    pub help_text: Option<String>,
    pub max_length: Option<i32>,
    pub decimal_places: Option<i32>,
    pub list_values: Vec<String>,
    pub empty_selection_list: bool,
    pub required: bool,
    pub staff_only: bool,
    pub ordering: Option<i32>,
    pub queue_id: Option<i64>,
}

impl NewCustomField {
    pub fn new(name: &str, label: &str, data_type: CustomFieldType) -> Self {
        Self {
            name: name.to_owned(),
            label: label.to_owned(),
            data_type,
            help_text: None,
            max_length: None,
            decimal_places: None,
            list_values: Vec::new(),
            empty_selection_list: false,
            required: false,
            staff_only: false,
            ordering: None,
            queue_id: None,
        }
    }
}

impl Model {
    pub async fn create(db: &DbConn, params: NewCustomField) -> Result<Model, DbErr> {
        if params.name.trim().is_empty() {
            return Err(DbErr::Custom("Custom field name is required".to_string()));
        }

        let list_values = if params.list_values.is_empty() {
            None
        } else {
            Some(params.list_values.join("\n"))
        };

        let active_model = ActiveModel {
            name: Set(params.name),
            label: Set(params.label),
            help_text: Set(params.help_text),
            data_type: Set(params.data_type),
            max_length: Set(params.max_length),
            decimal_places: Set(params.decimal_places),
            list_values: Set(list_values),
            empty_selection_list: Set(params.empty_selection_list),
            required: Set(params.required),
            staff_only: Set(params.staff_only),
            ordering: Set(params.ordering),
            queue_id: Set(params.queue_id),
            active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// Active fields that apply to `queue_id`: the queue's own fields plus the
    /// global ones, in display order.
    pub async fn for_queue<C: ConnectionTrait>(db: &C, queue_id: i64) -> Result<Vec<Model>, DbErr> {
        Self::ordered(
            Entity::find().filter(Column::Active.eq(true)).filter(
                Condition::any()
                    .add(Column::QueueId.is_null())
                    .add(Column::QueueId.eq(queue_id)),
            ),
        )
        .all(db)
        .await
    }

    /// Every active field regardless of queue, in display order.
    pub async fn all_active<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Self::ordered(Entity::find().filter(Column::Active.eq(true)))
            .all(db)
            .await
    }

    pub async fn set_active(db: &DbConn, id: i64, active: bool) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Custom field not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.active = Set(active);
        active_model.update(db).await
    }

    /// `ordering` ascending with unset last, then definition order.
    fn ordered(query: Select<Entity>) -> Select<Entity> {
        query
            .order_by_with_nulls(Column::Ordering, Order::Asc, NullOrdering::Last)
            .order_by_asc(Column::Id)
    }

    /// Choices for `list` fields, blank lines dropped.
    pub fn choices(&self) -> Vec<String> {
        self.list_values
            .as_deref()
            .unwrap_or("")
            .lines()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Name of the HTML input carrying this field's value.
    pub fn form_key(&self) -> String {
        format!("custom_{}", self.name)
    }
}
