use super::simulation::{ForceLayoutEngine, Snapshot, TickListener};
use super::types::GraphData;
use crate::config::StyleConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeLine {
	pub source_id: String,
	pub target_id: String,
	source: usize,
	target: usize,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeCircle {
	pub id: String,
	pub cx: f64,
	pub cy: f64,
	pub r: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeLabel {
	pub id: String,
	pub text: String,
	pub x: f64,
	pub y: f64,
}

/// Drawable layers keyed by node ids. Built once per graph, then only
/// coordinates change.
#[derive(Clone, Debug)]
pub struct Scene {
	pub edges: Vec<EdgeLine>,
	pub nodes: Vec<NodeCircle>,
	pub labels: Vec<NodeLabel>,
	label_offset: (f64, f64),
}

impl Scene {
	pub fn new(data: &GraphData, engine: &ForceLayoutEngine, style: &StyleConfig) -> Self {
		let edges = engine
			.edges()
			.iter()
			.map(|&(s, t)| EdgeLine {
				source_id: data.nodes[s].id.clone(),
				target_id: data.nodes[t].id.clone(),
				source: s,
				target: t,
				x1: 0.0,
				y1: 0.0,
				x2: 0.0,
				y2: 0.0,
			})
			.collect();
		let nodes = data
			.nodes
			.iter()
			.map(|node| NodeCircle {
				id: node.id.clone(),
				cx: 0.0,
				cy: 0.0,
				r: style.node_radius,
			})
			.collect();
		let labels = data
			.nodes
			.iter()
			.map(|node| NodeLabel {
				id: node.id.clone(),
				text: node.label.clone(),
				x: 0.0,
				y: 0.0,
			})
			.collect();

		let mut scene = Self {
			edges,
			nodes,
			labels,
			label_offset: style.label_offset,
		};
		scene.on_tick(&engine.snapshot());
		scene
	}
}

impl TickListener for Scene {
	fn on_tick(&mut self, snapshot: &Snapshot<'_>) {
		let (ox, oy) = self.label_offset;
		for ((circle, label), pos) in self.nodes.iter_mut().zip(&mut self.labels).zip(snapshot.nodes) {
			circle.cx = pos.x;
			circle.cy = pos.y;
			label.x = pos.x + ox;
			label.y = pos.y + oy;
		}
		for edge in &mut self.edges {
			let (source, target) = (&snapshot.nodes[edge.source], &snapshot.nodes[edge.target]);
			edge.x1 = source.x;
			edge.y1 = source.y;
			edge.x2 = target.x;
			edge.y2 = target.y;
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::backend::parse_items;
	use crate::components::force_graph::builder::GraphBuilder;
	use crate::config::LayoutConfig;

	fn fixture() -> (GraphData, ForceLayoutEngine) {
		let items = parse_items(json!({
			"items": [{
				"item_code": "ITM1",
				"item_name": "Widget",
				"sales_invoices": [{"sales_invoice": "SINV-1"}],
				"purchase_orders": [{"purchase_order": "PO-1"}]
			}]
		}))
		.unwrap();
		let data = GraphBuilder::default().build(&items);
		let engine = ForceLayoutEngine::new(&data, LayoutConfig::default(), (200.0, 100.0));
		(data, engine)
	}

	fn assert_synced(scene: &Scene, engine: &ForceLayoutEngine, style: &StyleConfig) {
		let nodes = engine.nodes();
		for (i, circle) in scene.nodes.iter().enumerate() {
			assert_eq!((circle.cx, circle.cy), (nodes[i].x, nodes[i].y));
			assert_eq!(circle.r, style.node_radius);
			let label = &scene.labels[i];
			assert_eq!(label.x, nodes[i].x + style.label_offset.0);
			assert_eq!(label.y, nodes[i].y + style.label_offset.1);
		}
		for (edge, &(s, t)) in scene.edges.iter().zip(engine.edges()) {
			assert_eq!((edge.x1, edge.y1), (nodes[s].x, nodes[s].y));
			assert_eq!((edge.x2, edge.y2), (nodes[t].x, nodes[t].y));
		}
	}

	#[test]
	fn layers_are_keyed_by_node_ids() {
		let (data, engine) = fixture();
		let scene = Scene::new(&data, &engine, &StyleConfig::default());
		let ids: Vec<&str> = scene.nodes.iter().map(|c| c.id.as_str()).collect();
		assert_eq!(ids, vec!["ITM1-0", "sales_invoice-SINV-1", "purchase_order-PO-1"]);
		let texts: Vec<&str> = scene.labels.iter().map(|l| l.text.as_str()).collect();
		assert_eq!(texts, vec!["Widget", "SINV-1", "PO-1"]);
		assert_eq!(scene.edges.len(), 2);
		assert_eq!(scene.edges[0].source_id, "ITM1-0");
		assert_eq!(scene.edges[0].target_id, "sales_invoice-SINV-1");
		assert_eq!(scene.edges[1].target_id, "purchase_order-PO-1");
	}

	#[test]
	fn follows_every_tick() {
		let style = StyleConfig::default();
		let (data, mut engine) = fixture();
		let mut scene = Scene::new(&data, &engine, &style);
		assert_synced(&scene, &engine, &style);

		for _ in 0..25 {
			engine.advance(&mut scene);
			assert_synced(&scene, &engine, &style);
		}
	}

	#[test]
	fn dragged_node_is_drawn_at_its_pin() {
		let style = StyleConfig::default();
		let (data, mut engine) = fixture();
		let mut scene = Scene::new(&data, &engine, &style);
		engine.pin(1, -40.0, 75.0);
		engine.advance(&mut scene);
		assert_eq!((scene.nodes[1].cx, scene.nodes[1].cy), (-40.0, 75.0));
		assert_eq!((scene.edges[0].x2, scene.edges[0].y2), (-40.0, 75.0));
	}
}
