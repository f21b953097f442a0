// Shared helpers for integration tests

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::{Arc, Once};
use tifomaster::canvas::mock::FixedMetricCanvasFactory;
use tifomaster::generator::{MockGenerator, SourceImage};
use tifomaster::orchestrator::Orchestrator;
use tifomaster::teams::{self, Team};
use tifomaster::watermark::Compositor;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("tifomaster=debug")
            .try_init();
    });
}

pub const STADIUM_GREEN: Rgba<u8> = Rgba([34, 139, 34, 255]);

/// Solid PNG of the given size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    RgbaImage::from_pixel(width, height, STADIUM_GREEN)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

pub fn selfie() -> SourceImage {
    SourceImage::from_bytes(png(48, 64))
}

pub fn team(id: &str) -> &'static Team {
    teams::find(id).unwrap()
}

pub type TestOrchestrator = Orchestrator<FixedMetricCanvasFactory>;

pub fn orchestrator(mock: &MockGenerator) -> Arc<TestOrchestrator> {
    init_logging();
    Arc::new(Orchestrator::new(
        Arc::new(mock.clone()),
        Compositor::new(FixedMetricCanvasFactory::new()),
    ))
}

/// Orchestrator with both inputs selected.
pub fn ready_orchestrator(mock: &MockGenerator, team_id: &str) -> Arc<TestOrchestrator> {
    let orch = orchestrator(mock);
    orch.select_image(selfie()).unwrap();
    orch.select_team(team(team_id)).unwrap();
    orch
}
