use crate::seed::Seeder;
use db::models::queue::Model as QueueModel;
use db::models::ticket::{Model, Priority};
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, lorem::en::Paragraph},
};
use sea_orm::{DatabaseConnection, DbErr};

pub struct TicketSeeder;

const TITLES: [&str; 6] = [
    "Cannot log in to VPN",
    "Printer jammed on floor 2",
    "Invoice shows wrong amount",
    "Laptop battery swelling",
    "Request for new monitor",
    "Email bouncing back",
];

#[async_trait::async_trait]
impl Seeder for TicketSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let queues = QueueModel::find_all(db).await?;
        if queues.is_empty() {
            return Err(DbErr::Custom("No queues to attach tickets to".into()));
        }

        if let Some(test) = queues.iter().find(|q| q.slug == "test") {
            Model::create(
                db,
                test.id,
                "Sample ticket",
                Some("submitter@example.com"),
                Priority::Normal,
                "",
            )
            .await?;
        }

        for _ in 0..20 {
            let queue = &queues[fastrand::usize(..queues.len())];
            let title = TITLES[fastrand::usize(..TITLES.len())];
            let email: String = SafeEmail().fake();
            let body: String = Paragraph(1..3).fake();
            let priority = Priority::from_value(fastrand::i32(1..=5)).unwrap_or_default();

            Model::create(db, queue.id, title, Some(&email), priority, &body).await?;
        }

        Ok(())
    }
}
