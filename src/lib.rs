// TifoMaster library: stadium tifo generation with a branded watermark

pub mod canvas;
pub mod config;
pub mod constants;
pub mod generator;
pub mod logging;
pub mod orchestrator;
pub mod share;
pub mod teams;
pub mod watermark;
