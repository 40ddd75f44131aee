mod component;
mod export;
mod minimap;
mod render;
pub mod scale;
mod state;

pub use component::{GraphController, TreeGraphCanvas};
