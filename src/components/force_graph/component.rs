use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ForceGraphState;
use super::types::GraphData;
use crate::config::GraphConfig;

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

/// Canvas surface for one graph. Mount a fresh one per graph; unmounting
/// stops its frame loop.
#[component]
pub fn ForceGraphCanvas(
	graph: GraphData,
	config: GraphConfig,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));
	let dragging = RwSignal::new(false);

	let alive_cleanup = alive.clone();
	on_cleanup(move || {
		alive_cleanup.store(false, Ordering::Relaxed);
		info!("graph surface torn down");
	});

	let (state_init, alive_init) = (state.clone(), alive.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();

		let parent = canvas.parent_element();
		let w = width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(800.0)
		});
		let h = height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(600.0)
		});
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx,
			_ => {
				warn!("canvas has no 2d context");
				return;
			}
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			warn!("2d context is not a CanvasRenderingContext2d");
			return;
		};

		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph, &config, w, h));
		info!(
			"graph surface mounted at {}x{} with {} nodes",
			w,
			h,
			graph.nodes.len()
		);
		let fit = (width.is_none() && height.is_none()).then_some(canvas);
		schedule_frame(state_init.clone(), ctx, fit, alive_init.clone());
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
			dragging.set(s.interaction.is_dragging() || s.interaction.pan.active);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
		dragging.set(false);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_up();
		}
		dragging.set(false);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(x, y, ev.delta_y(), ev.delta_mode());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style=move || {
				format!(
					"display: block; cursor: {};",
					if dragging.get() { "grabbing" } else { "grab" },
				)
			}
		/>
	}
}

/// Pointer position relative to the canvas' top-left corner.
fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Match the canvas to its parent's size when that has changed.
fn fit_to_parent(canvas: &HtmlCanvasElement, state: &mut ForceGraphState) {
	let Some(parent) = canvas.parent_element() else {
		return;
	};
	let (w, h) = (parent.client_width(), parent.client_height());
	if w <= 0 || h <= 0 || (w as u32 == canvas.width() && h as u32 == canvas.height()) {
		return;
	}
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	state.resize(w as f64, h as f64);
}

/// Tick and paint once per animation frame until the surface is torn down.
fn schedule_frame(
	state: SharedState,
	ctx: CanvasRenderingContext2d,
	fit: Option<HtmlCanvasElement>,
	alive: Arc<AtomicBool>,
) {
	request_animation_frame(move || {
		if !alive.load(Ordering::Relaxed) {
			return;
		}
		if let Some(ref mut s) = *state.borrow_mut() {
			if let Some(canvas) = &fit {
				fit_to_parent(canvas, s);
			}
			s.frame();
			render::render(s, &ctx);
		}
		schedule_frame(state, ctx, fit, alive);
	});
}
