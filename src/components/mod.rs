pub mod json_input;
pub mod preview;
pub mod search_bar;
pub mod theme_toggle;
pub mod tree_graph;
