use super::interaction::InteractionController;
use super::scene::Scene;
use super::simulation::ForceLayoutEngine;
use super::types::GraphData;
use crate::config::{GraphConfig, StyleConfig};

/// Everything one mounted canvas owns: the simulation, its drawable scene
/// and the pointer state.
pub struct ForceGraphState {
	pub engine: ForceLayoutEngine,
	pub scene: Scene,
	pub interaction: InteractionController,
	pub style: StyleConfig,
	pub width: f64,
	pub height: f64,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, config: &GraphConfig, width: f64, height: f64) -> Self {
		let engine = ForceLayoutEngine::new(data, config.layout, (width / 2.0, height / 2.0));
		let scene = Scene::new(data, &engine, &config.style);
		Self {
			engine,
			scene,
			interaction: InteractionController::new(config.zoom, config.style.hit_radius),
			style: config.style.clone(),
			width,
			height,
		}
	}

	/// Advance the simulation one step; returns whether it moved.
	pub fn frame(&mut self) -> bool {
		self.engine.advance(&mut self.scene)
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		self.interaction.pointer_down(&mut self.engine, sx, sy);
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		self.interaction.pointer_move(&mut self.engine, sx, sy);
	}

	pub fn pointer_up(&mut self) {
		self.interaction.release(&mut self.engine);
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64, delta_mode: u32) {
		self.interaction.wheel(sx, sy, delta_y, delta_mode);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.engine.set_center((width / 2.0, height / 2.0));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode, NodeKind};

	fn data() -> GraphData {
		GraphData {
			nodes: ["ITM1-0", "sales_invoice-SINV-1"]
				.into_iter()
				.map(|id| GraphNode {
					id: id.into(),
					label: id.into(),
					kind: NodeKind::Item { expanded: false },
				})
				.collect(),
			links: vec![GraphLink {
				source: "ITM1-0".into(),
				target: "sales_invoice-SINV-1".into(),
			}],
		}
	}

	#[test]
	fn frames_run_until_the_layout_rests() {
		let mut state = ForceGraphState::new(&data(), &GraphConfig::default(), 800.0, 600.0);
		let mut frames = 0;
		while state.frame() {
			frames += 1;
		}
		assert!(frames > 0);
		assert!(!state.frame());
		let circle = &state.scene.nodes[0];
		assert_eq!((circle.cx, circle.cy), (state.engine.nodes()[0].x, state.engine.nodes()[0].y));
	}

	#[test]
	fn dragging_a_resting_graph_wakes_it_up() {
		let mut state = ForceGraphState::new(&data(), &GraphConfig::default(), 800.0, 600.0);
		while state.frame() {}

		let node = &state.scene.nodes[1];
		let (sx, sy) = (node.cx, node.cy);
		state.pointer_down(sx, sy);
		assert!(state.frame());
		state.pointer_move(sx + 30.0, sy);
		state.frame();
		assert_eq!(state.scene.nodes[1].cx, sx + 30.0);

		state.pointer_up();
		while state.frame() {}
		assert_eq!(state.engine.nodes()[1].fx, None);
	}

	#[test]
	fn resize_moves_the_centre() {
		let mut state = ForceGraphState::new(&data(), &GraphConfig::default(), 800.0, 600.0);
		state.resize(400.0, 200.0);
		while state.frame() {}
		let n = state.engine.nodes().len() as f64;
		let cx = state.engine.nodes().iter().map(|p| p.x).sum::<f64>() / n;
		assert!((cx - 200.0).abs() < 1.0);
	}
}
