// Share and download flow after a completed generation

use super::test_harness::*;
use tifomaster::generator::MockGenerator;
use tifomaster::orchestrator::GenerationOutcome;
use tifomaster::share::{
    share_caption, share_or_download, social_links, RecordingShareSheet, ShareOutcome, ShareSheet,
};

async fn completed_tifo(team_id: &str) -> std::sync::Arc<tifomaster::watermark::WatermarkedImage> {
    let mock = MockGenerator::succeeding(png(800, 450));
    let orch = ready_orchestrator(&mock, team_id);
    match orch.generate().await.unwrap() {
        GenerationOutcome::Completed(image) => image,
        other => panic!("expected completion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_download_uses_team_filename() {
    let image = completed_tifo("ivorycoast").await;
    let dir = tempfile::tempdir().unwrap();

    let outcome = share_or_download(None, dir.path(), &image, Some(team("ivorycoast")))
        .await
        .unwrap();

    let path = dir.path().join("tifo-master-ivorycoast.png");
    assert_eq!(outcome, ShareOutcome::Downloaded(path.clone()));
    let saved = image::load_from_memory(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!((saved.width(), saved.height()), (800, 450));
}

#[tokio::test]
async fn test_native_share_gets_caption_and_title() {
    let image = completed_tifo("realmadrid").await;
    let dir = tempfile::tempdir().unwrap();
    let sheet = RecordingShareSheet::available();
    let sheet_ref: &dyn ShareSheet = &sheet;

    let outcome = share_or_download(Some(sheet_ref), dir.path(), &image, Some(team("realmadrid")))
        .await
        .unwrap();

    assert_eq!(outcome, ShareOutcome::Shared);
    let shared = sheet.shared();
    assert_eq!(shared[0].title, "Mon Tifo Master");
    assert_eq!(shared[0].text, share_caption("Real Madrid"));
    assert_eq!(shared[0].filename, "tifo-realmadrid.png");
}

#[test]
fn test_social_links_for_team_caption() {
    let caption = share_caption("Côte d'Ivoire");
    let links = social_links(&caption, "https://tifomaster.app");

    assert!(links.twitter.starts_with("https://twitter.com/intent/tweet?text=Regardez%20mon%20Tifo"));
    assert!(links.twitter.ends_with("&url=https%3A%2F%2Ftifomaster.app"));
    assert!(links.whatsapp.contains("C%C3%B4te%20d%27Ivoire"));
    assert!(links.whatsapp.ends_with("TifoMaster.%20https%3A%2F%2Ftifomaster.app"));
    assert_eq!(
        links.facebook,
        "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Ftifomaster.app"
    );
}
