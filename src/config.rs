//! Application configuration, passed explicitly to every component.

use log::warn;

use crate::components::force_graph::NodeIdPolicy;

/// Top-level configuration handed to the page.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
	pub backend: BackendConfig,
	pub graph: GraphConfig,
}

impl AppConfig {
	/// Build the configuration from compile-time environment overrides.
	pub fn from_env() -> Self {
		Self::from_vars(
			option_env!("DOCUMENT_FLOW_API_BASE"),
			option_env!("DOCUMENT_FLOW_API_MODULE"),
			option_env!("DOCUMENT_FLOW_NODE_IDS"),
		)
	}

	fn from_vars(base: Option<&str>, module: Option<&str>, node_ids: Option<&str>) -> Self {
		let mut config = Self::default();
		if let Some(base) = base {
			config.backend.base_url = base.trim_end_matches('/').to_string();
		}
		if let Some(module) = module.filter(|m| !m.is_empty()) {
			config.backend.api_module = module.to_string();
		}
		match node_ids.map(str::to_ascii_lowercase).as_deref() {
			Some("permissive") => config.graph.node_ids = NodeIdPolicy::Permissive,
			Some("merge") | None => config.graph.node_ids = NodeIdPolicy::Merge,
			Some(other) => warn!("unknown node id policy {other:?}, using merge"),
		}
		config
	}
}

/// Where the link-resolving service lives.
#[derive(Clone, Debug)]
pub struct BackendConfig {
	/// Origin prefix for API calls; empty means same origin.
	pub base_url: String,
	/// Dotted module path holding the resolver methods.
	pub api_module: String,
}

impl Default for BackendConfig {
	fn default() -> Self {
		Self {
			base_url: String::new(),
			api_module: "document_flow.api".into(),
		}
	}
}

/// Everything the graph surface needs.
#[derive(Clone, Debug, Default)]
pub struct GraphConfig {
	pub layout: LayoutConfig,
	pub style: StyleConfig,
	pub zoom: ZoomBounds,
	pub node_ids: NodeIdPolicy,
}

/// Force simulation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Rest length of every link.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Strength of the centering shift, 1.0 recentres fully each tick.
	pub center_strength: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Target alpha while a node is being dragged.
	pub drag_alpha_target: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			link_distance: 250.0,
			charge_strength: -100.0,
			center_strength: 1.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
		}
	}
}

/// Visual constants for the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleConfig {
	pub node_radius: f64,
	/// World-space radius used for picking nodes under the pointer.
	pub hit_radius: f64,
	pub node_fill: String,
	pub edge_stroke: String,
	pub edge_width: f64,
	pub label_fill: String,
	pub label_font: String,
	/// Label position relative to its node centre.
	pub label_offset: (f64, f64),
	pub background: String,
}

impl Default for StyleConfig {
	fn default() -> Self {
		Self {
			node_radius: 10.0,
			hit_radius: 14.0,
			node_fill: "#69b3a2".into(),
			edge_stroke: "#999999".into(),
			edge_width: 1.5,
			label_fill: "#333333".into(),
			label_font: "12px sans-serif".into(),
			label_offset: (12.0, 4.0),
			background: "#ffffff".into(),
		}
	}
}

/// Allowed range of the zoom scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBounds {
	pub min: f64,
	pub max: f64,
}

impl Default for ZoomBounds {
	fn default() -> Self {
		Self { min: 0.1, max: 3.0 }
	}
}

impl ZoomBounds {
	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min, self.max)
	}
}
