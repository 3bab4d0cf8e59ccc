use std::collections::HashSet;

use log::{info, warn};

use super::types::{GraphData, GraphLink, GraphNode, NodeKind};
use crate::backend::{BackendItem, Category, connection_value};

/// What to do when two connections synthesize the same node id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeIdPolicy {
	/// Keep one node per id (first definition wins); links still converge on it.
	#[default]
	Merge,
	/// Push every occurrence; the layout resolves ids last-defined-wins.
	Permissive,
}

/// Turns backend items into the node/link model.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphBuilder {
	policy: NodeIdPolicy,
}

impl GraphBuilder {
	pub fn new(policy: NodeIdPolicy) -> Self {
		Self { policy }
	}

	pub fn build(&self, items: &[BackendItem]) -> GraphData {
		let mut data = GraphData::default();
		let mut seen = HashSet::new();

		for (idx, item) in items.iter().enumerate() {
			// Position suffix keeps repeated item codes apart.
			let parent_id = format!("{}-{}", item.item_code, idx);
			let label = if item.item_name.is_empty() {
				item.item_code.clone()
			} else {
				item.item_name.clone()
			};
			self.push_node(
				&mut data,
				&mut seen,
				GraphNode {
					id: parent_id.clone(),
					label,
					kind: NodeKind::Item { expanded: false },
				},
			);

			for category in Category::ALL {
				for connection in item.connections(category) {
					let Some(value) = connection_value(connection, category) else {
						warn!(
							"skipping {} connection of {} without a `{}` value",
							category.key(),
							parent_id,
							category.key()
						);
						continue;
					};
					let child_id = format!("{}-{}", category.key(), value);
					self.push_node(
						&mut data,
						&mut seen,
						GraphNode {
							id: child_id.clone(),
							label: value,
							kind: NodeKind::Document { category },
						},
					);
					data.links.push(GraphLink {
						source: parent_id.clone(),
						target: child_id,
					});
				}
			}
		}

		info!(
			"built graph with {} nodes and {} links from {} items ({} connections)",
			data.nodes.len(),
			data.links.len(),
			items.len(),
			items.iter().map(BackendItem::connection_count).sum::<usize>()
		);
		data
	}

	fn push_node(&self, data: &mut GraphData, seen: &mut HashSet<String>, node: GraphNode) {
		match self.policy {
			NodeIdPolicy::Permissive => data.nodes.push(node),
			NodeIdPolicy::Merge => {
				if seen.insert(node.id.clone()) {
					data.nodes.push(node);
				}
			}
		}
	}
}
