use crate::seed::Seeder;
use db::models::queue::Model;
use sea_orm::{DatabaseConnection, DbErr};

pub struct QueueSeeder;

const QUEUES: [(&str, &str); 3] = [
    ("Test Queue", "test"),
    ("IT Support", "it-support"),
    ("Billing", "billing"),
];

#[async_trait::async_trait]
impl Seeder for QueueSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for (title, slug) in QUEUES {
            if Model::get_by_slug(db, slug).await?.is_none() {
                Model::create(db, title, slug).await?;
            }
        }
        Ok(())
    }
}
