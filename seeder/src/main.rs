use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    custom_field::CustomFieldSeeder, kb_item::KbItemSeeder, queue::QueueSeeder,
    ticket::TicketSeeder, user::UserSeeder,
};
use colored::*;
use migration::Migrator;
use sea_orm_migration::MigratorTrait;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {}", "Failed to connect to database:".red().bold(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {}", "Failed to apply migrations:".red().bold(), e);
        std::process::exit(1);
    }

    let seeders: Vec<(Box<dyn Seeder + Send + Sync>, &str)> = vec![
        (Box::new(UserSeeder), "User"),
        (Box::new(QueueSeeder), "Queue"),
        (Box::new(CustomFieldSeeder), "CustomField"),
        (Box::new(TicketSeeder), "Ticket"),
        (Box::new(KbItemSeeder), "KbItem"),
    ];

    for (seeder, name) in &seeders {
        run_seeder(&**seeder, name, &db).await;
    }
}
