pub mod force_graph;
pub mod notices;
