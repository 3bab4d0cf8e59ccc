use crate::backend::Category;

/// What a node stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// Top-level item of the root document. `expanded` is reserved for
	/// incremental expansion and always `false` for now.
	Item { expanded: bool },
	/// A linked downstream document.
	Document { category: Category },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
