use crate::seed::Seeder;
use db::models::kb_item::Model;
use db::models::kbi_attachment::Model as KbiAttachmentModel;
use sea_orm::{DatabaseConnection, DbErr};
use util::paths::storage_root;

pub struct KbItemSeeder;

const VPN_GUIDE: &str = "1. Install the VPN client from the intranet.\n\
2. Sign in with your staff account.\n\
3. Pick the nearest gateway and connect.\n";

#[async_trait::async_trait]
impl Seeder for KbItemSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let vpn = Model::create(
            db,
            "VPN access",
            "How do I connect to the VPN from home?",
            "Install the client from the intranet and sign in with your staff account.",
        )
        .await?;

        // The row points at a real file under the storage root
        let guide = KbiAttachmentModel::create(
            db,
            vpn.id,
            "vpn-guide.txt",
            "text/plain",
            VPN_GUIDE.len() as i64,
        )
        .await?;
        let path = storage_root().join(&guide.file);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DbErr::Custom(format!("Failed to create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&path, VPN_GUIDE)
            .await
            .map_err(|e| DbErr::Custom(format!("Failed to write {}: {e}", path.display())))?;

        Model::create(
            db,
            "Password reset",
            "I forgot my password.",
            "Ask a staff member to reset it from the admin console.",
        )
        .await?;

        Ok(())
    }
}
