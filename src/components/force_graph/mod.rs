mod builder;
mod component;
mod interaction;
mod render;
mod scene;
mod simulation;
mod state;
mod types;

pub use builder::{GraphBuilder, NodeIdPolicy};
pub use component::ForceGraphCanvas;
pub use types::GraphData;
