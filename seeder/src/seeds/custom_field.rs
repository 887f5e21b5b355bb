use crate::seed::Seeder;
use db::models::custom_field::{CustomFieldType, Model, NewCustomField};
use db::models::queue::Model as QueueModel;
use sea_orm::{DatabaseConnection, DbErr};

pub struct CustomFieldSeeder;

#[async_trait::async_trait]
impl Seeder for CustomFieldSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let existing: Vec<String> = Model::all_active(db)
            .await?
            .into_iter()
            .map(|f| f.name)
            .collect();

        let billing = QueueModel::get_by_slug(db, "billing").await?;
        let it_support = QueueModel::get_by_slug(db, "it-support").await?;

        let fields = [
            NewCustomField {
                max_length: Some(50),
                ordering: Some(1),
                ..NewCustomField::new("extra_info", "Extra Info", CustomFieldType::Varchar)
            },
            NewCustomField {
                list_values: vec!["Laptop".into(), "Desktop".into(), "Phone".into()],
                empty_selection_list: true,
                ordering: Some(2),
                queue_id: it_support.as_ref().map(|q| q.id),
                ..NewCustomField::new("device", "Device", CustomFieldType::List)
            },
            NewCustomField {
                help_text: Some("Address of the affected machine".into()),
                queue_id: it_support.as_ref().map(|q| q.id),
                ..NewCustomField::new("host_ip", "Host IP", CustomFieldType::Ipaddress)
            },
            NewCustomField {
                decimal_places: Some(2),
                queue_id: billing.map(|q| q.id),
                ..NewCustomField::new("amount", "Disputed Amount", CustomFieldType::Decimal)
            },
            NewCustomField::new("due_date", "Due Date", CustomFieldType::Date),
            NewCustomField::new("vip", "VIP Customer", CustomFieldType::Boolean),
        ];

        for field in fields {
            if !existing.contains(&field.name) {
                Model::create(db, field).await?;
            }
        }

        Ok(())
    }
}
