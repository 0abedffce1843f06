mod app;
mod config;
mod input;
mod logging;
mod render;
mod surface;

pub use app::run_app;
