mod camera;
mod clipboard;
mod component;
mod highlight;
mod interaction;
mod loader;
mod palette;
mod proximity;
mod render;
mod state;
mod store;
mod types;

pub use component::PointCloudCanvas;
pub use highlight::{FadeConfig, OverlayRadius};
