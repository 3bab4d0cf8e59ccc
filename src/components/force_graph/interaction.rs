use super::simulation::ForceLayoutEngine;
use crate::config::ZoomBounds;

/// Screen-from-world transform: `screen = world * k + (x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<usize>,
	/// Node position minus pointer position at grab time, in world units.
	pub grab_dx: f64,
	pub grab_dy: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Wheel delta mode as reported by `WheelEvent::delta_mode`.
const DOM_DELTA_LINE: u32 = 1;

/// Pan/zoom of the whole scene and single-node drag.
#[derive(Clone, Debug)]
pub struct InteractionController {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	zoom: ZoomBounds,
	hit_radius: f64,
}

impl InteractionController {
	pub fn new(zoom: ZoomBounds, hit_radius: f64) -> Self {
		Self {
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			zoom,
			hit_radius,
		}
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.node_idx.is_some()
	}

	/// Topmost node under a screen point.
	pub fn node_at(&self, engine: &ForceLayoutEngine, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.transform.screen_to_world(sx, sy);
		engine
			.nodes()
			.iter()
			.enumerate()
			.rev()
			.find(|(_, node)| {
				let (dx, dy) = (node.x - gx, node.y - gy);
				(dx * dx + dy * dy).sqrt() < self.hit_radius
			})
			.map(|(idx, _)| idx)
	}

	/// Grab the node under the pointer, or start panning the background.
	pub fn pointer_down(&mut self, engine: &mut ForceLayoutEngine, sx: f64, sy: f64) {
		self.release(engine);
		match self.node_at(engine, sx, sy) {
			Some(idx) => self.start_drag(engine, idx, sx, sy),
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	/// Pin `idx` where the simulation last put it and reheat.
	pub fn start_drag(&mut self, engine: &mut ForceLayoutEngine, idx: usize, sx: f64, sy: f64) {
		let Some(node) = engine.node(idx) else {
			return;
		};
		let (x, y) = (node.x, node.y);
		let (gx, gy) = self.transform.screen_to_world(sx, sy);
		if let Some(prev) = self.drag.node_idx.take() {
			engine.unpin(prev);
		}
		engine.pin(idx, x, y);
		engine.reheat();
		self.drag = DragState {
			node_idx: Some(idx),
			grab_dx: x - gx,
			grab_dy: y - gy,
		};
	}

	pub fn pointer_move(&mut self, engine: &mut ForceLayoutEngine, sx: f64, sy: f64) {
		if let Some(idx) = self.drag.node_idx {
			let (gx, gy) = self.transform.screen_to_world(sx, sy);
			engine.pin(idx, gx + self.drag.grab_dx, gy + self.drag.grab_dy);
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// End any drag or pan; the dragged node goes back under the forces.
	pub fn release(&mut self, engine: &mut ForceLayoutEngine) {
		if let Some(idx) = self.drag.node_idx.take() {
			engine.unpin(idx);
			engine.cool();
		}
		self.drag = DragState::default();
		self.pan.active = false;
	}

	/// Zoom by a wheel gesture, anchored at the pointer.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64, delta_mode: u32) {
		let per_unit = match delta_mode {
			0 => 0.002,
			DOM_DELTA_LINE => 0.05,
			_ => 1.0,
		};
		self.zoom_at(sx, sy, 2f64.powf(-delta_y * per_unit));
	}

	/// Scale by `factor` around a screen point, keeping that point fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = self.zoom.clamp(self.transform.k * factor);
		if new_k.is_nan() {
			return;
		}
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}
