pub mod app;
pub mod data;
pub mod replay;
pub mod telemetry;

pub use app::run as run_app;
