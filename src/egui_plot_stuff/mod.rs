pub mod colors;
pub mod multi_graph;
pub mod style;
