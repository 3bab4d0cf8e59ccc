use std::collections::HashMap;
use std::f64::consts::PI;

use log::{debug, warn};

use super::types::GraphData;
use crate::config::LayoutConfig;

const INITIAL_RADIUS: f64 = 10.0;
const DISTANCE_MIN2: f64 = 1.0;

/// Positional state of one node, index-aligned with `GraphData::nodes`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Fixed coordinates; only the dragged node has them.
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

/// Positions after one integration step.
pub struct Snapshot<'a> {
	pub nodes: &'a [SimNode],
}

/// Receives every tick of the simulation.
pub trait TickListener {
	fn on_tick(&mut self, snapshot: &Snapshot<'_>);
}

/// Linear congruential generator used for jiggling coincident nodes.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Lcg {
	fn next_f64(&mut self) -> f64 {
		const A: u64 = 1_664_525;
		const C: u64 = 1_013_904_223;
		const M: u64 = 1 << 32;
		self.0 = (A * self.0 + C) % M;
		self.0 as f64 / M as f64
	}

	fn jiggle(&mut self) -> f64 {
		(self.next_f64() - 0.5) * 1e-6
	}
}

/// Iterative force-directed layout: link springs, many-body repulsion and
/// centering, cooled by a decaying alpha.
pub struct ForceLayoutEngine {
	nodes: Vec<SimNode>,
	edges: Vec<(usize, usize)>,
	strengths: Vec<f64>,
	biases: Vec<f64>,
	config: LayoutConfig,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	running: bool,
	random: Lcg,
}

impl ForceLayoutEngine {
	pub fn new(data: &GraphData, config: LayoutConfig, center: (f64, f64)) -> Self {
		// Later duplicates overwrite earlier ones.
		let index: HashMap<&str, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.as_str(), i))
			.collect();

		let edges: Vec<(usize, usize)> = data
			.links
			.iter()
			.filter_map(|link| {
				match (index.get(link.source.as_str()), index.get(link.target.as_str())) {
					(Some(&s), Some(&t)) => Some((s, t)),
					_ => {
						warn!("dropping dangling link {} -> {}", link.source, link.target);
						None
					}
				}
			})
			.collect();

		let mut degree = vec![0usize; data.nodes.len()];
		for &(s, t) in &edges {
			degree[s] += 1;
			degree[t] += 1;
		}
		let strengths = edges
			.iter()
			.map(|&(s, t)| 1.0 / degree[s].min(degree[t]) as f64)
			.collect();
		let biases = edges
			.iter()
			.map(|&(s, t)| degree[s] as f64 / (degree[s] + degree[t]) as f64)
			.collect();

		let golden = PI * (3.0 - 5f64.sqrt());
		let nodes: Vec<SimNode> = (0..data.nodes.len())
			.map(|i| {
				let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * golden;
				SimNode {
					x: center.0 + radius * angle.cos(),
					y: center.1 + radius * angle.sin(),
					..SimNode::default()
				}
			})
			.collect();

		Self {
			running: !nodes.is_empty(),
			nodes,
			edges,
			strengths,
			biases,
			config,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			random: Lcg(1),
		}
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn node(&self, idx: usize) -> Option<&SimNode> {
		self.nodes.get(idx)
	}

	/// Resolved `(source, target)` node indices.
	pub fn edges(&self) -> &[(usize, usize)] {
		&self.edges
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	#[cfg(test)]
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	#[cfg(test)]
	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn snapshot(&self) -> Snapshot<'_> {
		Snapshot { nodes: &self.nodes }
	}

	pub fn set_center(&mut self, center: (f64, f64)) {
		self.center = center;
	}

	/// Run one step if the simulation is still warm and notify `listener`.
	pub fn advance(&mut self, listener: &mut impl TickListener) -> bool {
		if !self.running {
			return false;
		}
		self.tick();
		listener.on_tick(&self.snapshot());
		if self.alpha < self.config.alpha_min {
			self.running = false;
			debug!("simulation settled after cooling to alpha {:.5}", self.alpha);
		}
		true
	}

	/// Raise the target alpha so the layout visibly re-settles.
	pub fn reheat(&mut self) {
		self.alpha_target = self.config.drag_alpha_target;
		self.running = !self.nodes.is_empty();
	}

	/// Let alpha decay back to rest.
	pub fn cool(&mut self) {
		self.alpha_target = 0.0;
	}

	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = Some(x);
			node.fy = Some(y);
		}
	}

	pub fn unpin(&mut self, idx: usize) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = None;
			node.fy = None;
		}
	}

	/// One integration step regardless of temperature.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		self.apply_links();
		self.apply_charge();
		self.apply_center();

		let retain = 1.0 - self.config.velocity_decay;
		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= retain;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= retain;
					node.y += node.vy;
				}
			}
		}
	}

	fn apply_links(&mut self) {
		let distance = self.config.link_distance;
		for (i, &(s, t)) in self.edges.iter().enumerate() {
			let (source, target) = (&self.nodes[s], &self.nodes[t]);
			let mut x = target.x + target.vx - source.x - source.vx;
			let mut y = target.y + target.vy - source.y - source.vy;
			if x == 0.0 {
				x = self.random.jiggle();
			}
			if y == 0.0 {
				y = self.random.jiggle();
			}
			let l = (x * x + y * y).sqrt();
			let l = (l - distance) / l * self.alpha * self.strengths[i];
			let (x, y) = (x * l, y * l);
			let b = self.biases[i];

			let target = &mut self.nodes[t];
			target.vx -= x * b;
			target.vy -= y * b;
			let source = &mut self.nodes[s];
			source.vx += x * (1.0 - b);
			source.vy += y * (1.0 - b);
		}
	}

	fn apply_charge(&mut self) {
		let strength = self.config.charge_strength;
		let n = self.nodes.len();
		for i in 0..n {
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut x = self.nodes[j].x - self.nodes[i].x;
				let mut y = self.nodes[j].y - self.nodes[i].y;
				let mut l = x * x + y * y;
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				if l < DISTANCE_MIN2 {
					l = (DISTANCE_MIN2 * l).sqrt();
				}
				let w = strength * self.alpha / l;
				dvx += x * w;
				dvy += y * w;
			}
			self.nodes[i].vx += dvx;
			self.nodes[i].vy += dvy;
		}
	}

	fn apply_center(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let strength = self.config.center_strength;
		let (dx, dy) = (
			(sx / n - self.center.0) * strength,
			(sy / n - self.center.1) * strength,
		);
		for node in &mut self.nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode, NodeKind};

	const CENTER: (f64, f64) = (400.0, 300.0);

	fn graph(ids: &[&str], links: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: ids
				.iter()
				.map(|id| GraphNode {
					id: id.to_string(),
					label: id.to_string(),
					kind: NodeKind::Item { expanded: false },
				})
				.collect(),
			links: links
				.iter()
				.map(|(s, t)| GraphLink {
					source: s.to_string(),
					target: t.to_string(),
				})
				.collect(),
		}
	}

	fn star() -> GraphData {
		graph(
			&["root", "a", "b", "c"],
			&[("root", "a"), ("root", "b"), ("root", "c")],
		)
	}

	#[derive(Default)]
	struct Counter {
		ticks: usize,
		last_len: usize,
	}

	impl TickListener for Counter {
		fn on_tick(&mut self, snapshot: &Snapshot<'_>) {
			self.ticks += 1;
			self.last_len = snapshot.nodes.len();
		}
	}

	fn settle(engine: &mut ForceLayoutEngine) -> usize {
		let mut counter = Counter::default();
		while engine.advance(&mut counter) {
			assert!(counter.ticks < 10_000, "simulation never cooled");
		}
		counter.ticks
	}

	fn distance(a: &SimNode, b: &SimNode) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn resolves_links_to_indices_and_drops_dangling_ones() {
		let data = graph(&["a", "b"], &[("a", "b"), ("a", "ghost")]);
		let engine = ForceLayoutEngine::new(&data, LayoutConfig::default(), CENTER);
		assert_eq!(engine.nodes().len(), 2);
		assert_eq!(engine.edges(), &[(0, 1)]);
	}

	#[test]
	fn duplicate_ids_resolve_to_last_definition() {
		let data = graph(&["a", "dup", "dup"], &[("a", "dup")]);
		let engine = ForceLayoutEngine::new(&data, LayoutConfig::default(), CENTER);
		assert_eq!(engine.edges(), &[(0, 2)]);
	}

	#[test]
	fn initial_positions_are_distinct() {
		let engine = ForceLayoutEngine::new(&star(), LayoutConfig::default(), CENTER);
		let nodes = engine.nodes();
		for i in 0..nodes.len() {
			for j in (i + 1)..nodes.len() {
				assert!(distance(&nodes[i], &nodes[j]) > 1.0);
			}
		}
	}

	#[test]
	fn cools_down_and_stops_emitting_ticks() {
		let mut engine = ForceLayoutEngine::new(&star(), LayoutConfig::default(), CENTER);
		let ticks = settle(&mut engine);
		assert!((250..=350).contains(&ticks), "{ticks} ticks");
		assert!(!engine.is_running());
		assert!(engine.alpha() < LayoutConfig::default().alpha_min);

		let mut counter = Counter::default();
		assert!(!engine.advance(&mut counter));
		assert_eq!(counter.ticks, 0);
	}

	#[test]
	fn listener_sees_every_node() {
		let mut engine = ForceLayoutEngine::new(&star(), LayoutConfig::default(), CENTER);
		let mut counter = Counter::default();
		engine.advance(&mut counter);
		assert_eq!(counter.ticks, 1);
		assert_eq!(counter.last_len, 4);
	}

	#[test]
	fn empty_graph_never_runs() {
		let mut engine =
			ForceLayoutEngine::new(&GraphData::default(), LayoutConfig::default(), CENTER);
		assert!(!engine.is_running());
		engine.reheat();
		assert!(!engine.is_running());
	}

	#[test]
	fn reheat_keeps_running_until_cooled() {
		let mut engine = ForceLayoutEngine::new(&star(), LayoutConfig::default(), CENTER);
		settle(&mut engine);

		engine.reheat();
		assert!(engine.is_running());
		let mut counter = Counter::default();
		for _ in 0..1_000 {
			assert!(engine.advance(&mut counter));
		}
		assert!((engine.alpha() - 0.3).abs() < 0.01);

		engine.cool();
		settle(&mut engine);
		assert!(!engine.is_running());
	}

	#[test]
	fn linked_nodes_settle_near_link_distance() {
		let data = graph(&["a", "b"], &[("a", "b")]);
		let mut engine = ForceLayoutEngine::new(&data, LayoutConfig::default(), CENTER);
		let before = distance(&engine.nodes()[0], &engine.nodes()[1]);
		settle(&mut engine);
		let after = distance(&engine.nodes()[0], &engine.nodes()[1]);
		assert!((after - 250.0).abs() < (before - 250.0).abs());
		assert!((after - 250.0).abs() < 25.0, "settled at {after}");
	}

	#[test]
	fn unlinked_nodes_repel() {
		let data = graph(&["a", "b"], &[]);
		let mut engine = ForceLayoutEngine::new(&data, LayoutConfig::default(), CENTER);
		let before = distance(&engine.nodes()[0], &engine.nodes()[1]);
		settle(&mut engine);
		assert!(distance(&engine.nodes()[0], &engine.nodes()[1]) > before);
	}

	#[test]
	fn centre_of_mass_converges_to_canvas_centre() {
		let mut engine = ForceLayoutEngine::new(&star(), LayoutConfig::default(), CENTER);
		settle(&mut engine);
		let n = engine.nodes().len() as f64;
		let cx = engine.nodes().iter().map(|p| p.x).sum::<f64>() / n;
		let cy = engine.nodes().iter().map(|p| p.y).sum::<f64>() / n;
		assert!((cx - CENTER.0).abs() < 1.0, "cx {cx}");
		assert!((cy - CENTER.1).abs() < 1.0, "cy {cy}");
	}

	#[test]
	fn pinned_node_holds_its_fixed_coordinates() {
		let mut engine = ForceLayoutEngine::new(&star(), LayoutConfig::default(), CENTER);
		engine.pin(1, 10.0, 20.0);
		engine.tick();
		let node = &engine.nodes()[1];
		assert_eq!((node.x, node.y), (10.0, 20.0));
		assert_eq!((node.vx, node.vy), (0.0, 0.0));

		engine.unpin(1);
		assert_eq!(engine.nodes()[1].fx, None);
		assert_eq!(engine.nodes()[1].fy, None);
	}

	#[test]
	fn coincident_nodes_are_separated() {
		let data = graph(&["a", "b"], &[]);
		let mut engine = ForceLayoutEngine::new(&data, LayoutConfig::default(), CENTER);
		engine.pin(0, 5.0, 5.0);
		engine.pin(1, 5.0, 5.0);
		engine.tick();
		engine.unpin(0);
		engine.unpin(1);
		settle(&mut engine);
		let nodes = engine.nodes();
		assert!(nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
		assert!(distance(&nodes[0], &nodes[1]) > 1.0);
	}
}
