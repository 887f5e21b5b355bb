use crate::seed::Seeder;
use db::models::user::Model;
use fake::{Fake, faker::internet::en::SafeEmail};
use sea_orm::{DatabaseConnection, DbErr};

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // Fixed staff user
        if Model::get_by_username(db, "admin").await?.is_none() {
            Model::create(db, "admin", "admin@example.com", "password123", true).await?;
        }

        // Fixed non-staff user
        if Model::get_by_username(db, "user").await?.is_none() {
            Model::create(db, "user", "user@example.com", "password123", false).await?;
        }

        // Random staff
        for _ in 0..5 {
            let username = format!("agent{:06}", fastrand::u32(..1_000_000));
            if Model::get_by_username(db, &username).await?.is_some() {
                continue;
            }
            let email: String = SafeEmail().fake();
            Model::create(db, &username, &email, "password123", true).await?;
        }

        Ok(())
    }
}
