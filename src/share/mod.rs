//! Getting a finished tifo out of the app: local save, native share sheet,
//! and social network links.

pub mod links;
pub mod sheet;

pub use links::{social_links, SocialLinks};
pub use sheet::{
    share_or_download, RecordingShareSheet, ShareError, ShareOutcome, SharePayload, ShareSheet,
    SharedItem,
};

use std::path::{Path, PathBuf};

use crate::teams::Team;
use crate::watermark::WatermarkedImage;

/// Title passed to the share sheet.
pub const SHARE_TITLE: &str = "Mon Tifo Master";

/// Shown when the image was saved because direct sharing is unsupported.
pub const MANUAL_SHARE_NOTICE: &str = "Le partage direct n'est pas supporté par votre navigateur. \
L'image a été téléchargée, vous pouvez maintenant la partager manuellement sur vos réseaux préférés !";

/// Name of a downloaded tifo: `tifo-master-<teamId>.png`, or
/// `tifo-master-fan.png` without a team.
pub fn download_filename(team_id: Option<&str>) -> String {
    let id = team_id.filter(|id| !id.is_empty()).unwrap_or("fan");
    format!("tifo-master-{}.png", id)
}

/// Name of the file attached to the share sheet.
pub fn share_filename(team_id: Option<&str>) -> String {
    let id = team_id.filter(|id| !id.is_empty()).unwrap_or("fan");
    format!("tifo-{}.png", id)
}

/// Caption for shares and social posts.
pub fn share_caption(team_name: &str) -> String {
    format!(
        "Regardez mon Tifo personnalisé pour supporter {} ! Créez le vôtre sur TifoMaster.",
        team_name
    )
}

/// Write the image into `dir` under its download name and return the path.
///
/// The directory is created if needed. An existing file is overwritten.
pub async fn save_to_dir(
    dir: &Path,
    image: &WatermarkedImage,
    team: Option<&Team>,
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(download_filename(team.map(|t| t.id)));
    tokio::fs::write(&path, image.png()).await?;

    tracing::debug!(path = %path.display(), bytes = image.png().len(), "Saved tifo");
    Ok(path)
}
