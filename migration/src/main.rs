use std::{fs, path::Path};
use util::config;

mod runner;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let db_path = config::database_path();
    let url = format!("sqlite://{}?mode=rwc", db_path);
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(&db_path);
            remove_attachment_storage();
        }
        Some("fresh") => {
            remove_db_file(&db_path);
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
        _ => {
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if db_path.exists() {
        match fs::remove_file(db_path) {
            Ok(()) => println!("Deleted DB: {}", db_path.display()),
            Err(e) => eprintln!("Failed to delete DB {}: {}", db_path.display(), e),
        }
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

fn remove_attachment_storage() {
    let storage_path = util::paths::storage_root();
    if storage_path.exists() {
        match fs::remove_dir_all(&storage_path) {
            Ok(()) => println!("Deleted attachments: {}", storage_path.display()),
            Err(e) => eprintln!(
                "Failed to delete attachments {}: {}",
                storage_path.display(),
                e
            ),
        }
    } else {
        println!("Attachment storage does not exist: {}", storage_path.display());
    }
}

fn create_db_dir(path: &str) {
    if let Err(e) = util::paths::ensure_parent_dir(path) {
        eprintln!("Failed to create DB directory: {}", e);
        std::process::exit(1);
    }
}
