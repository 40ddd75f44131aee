//! Browser-independent core: parsing, tree layout, path search and app state.

pub mod layout;
pub mod parse;
pub mod path;
pub mod search;
pub mod theme;
pub mod workspace;

pub use layout::{Bounds, GraphEdge, GraphNode, LayoutConfig, NodeCategory, TreeGraph, ValueKind, build_graph};
pub use parse::{InputError, parse_document};
pub use path::{NodePath, Segment};
pub use search::{SearchOutcome, find_node, normalize_query};
pub use theme::{Palette, Theme};
pub use workspace::{Phase, Workspace};
