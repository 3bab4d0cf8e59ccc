use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::backend::{Doctype, FrappeClient};
use crate::components::force_graph::{ForceGraphCanvas, GraphBuilder, GraphData};
use crate::components::notices::{NoticeQueue, NoticeStack};
use crate::config::AppConfig;
use crate::notice::Notice;
use crate::selection::{Action, Completion, FetchRequest, SelectionController};

/// Shared handles the page's event handlers and fetch tasks work through.
#[derive(Clone)]
struct FlowHandle {
	controller: Rc<RefCell<SelectionController>>,
	client: Rc<FrappeClient>,
	surface: RwSignal<Option<GraphData>>,
	documents: RwSignal<Vec<String>>,
	document_input: RwSignal<String>,
	notices: NoticeQueue,
}

impl FlowHandle {
	fn dispatch(&self, action: Action) {
		match action {
			Action::Idle => {}
			Action::Reconfigure(doctype) => {
				self.surface.set(None);
				self.document_input.set(String::new());
				self.documents.set(Vec::new());
				if let Some(doctype) = doctype {
					self.load_documents(doctype);
				}
			}
			Action::Clear => self.surface.set(None),
			Action::Notify(notice) => {
				self.surface.set(None);
				self.notices.push(notice);
			}
			Action::Fetch(request) => {
				// Old canvas goes away before anything else is fetched.
				self.surface.set(None);
				self.resolve(request);
			}
		}
	}

	fn resolve(&self, request: FetchRequest) {
		let handle = self.clone();
		spawn_local(async move {
			let result = handle
				.client
				.resolve_links(request.resolver, &request.document)
				.await;
			let completion = handle.controller.borrow().complete(request.ticket, result);
			match completion {
				Completion::Stale => {}
				Completion::Render { graph, .. } => {
					info!("rendering links of {}", request.document);
					handle.surface.set(Some(graph));
				}
				Completion::Notify(notice) => handle.notices.push(notice),
			}
		});
	}

	fn load_documents(&self, doctype: Doctype) {
		let handle = self.clone();
		spawn_local(async move {
			match handle.client.list_submitted(doctype).await {
				Ok(names) if handle.controller.borrow().doctype() == Some(doctype) => {
					handle.documents.set(names);
				}
				Ok(_) => {}
				Err(e) => {
					warn!("could not list {doctype} documents: {e}");
					handle
						.notices
						.push(Notice::error(format!("Could not load {doctype} documents: {e}")));
				}
			}
		});
	}
}

/// Doctype and document pickers over the traceability graph.
#[component]
pub fn DocumentFlow(config: AppConfig) -> impl IntoView {
	let handle = FlowHandle {
		controller: Rc::new(RefCell::new(SelectionController::new(GraphBuilder::new(
			config.graph.node_ids,
		)))),
		client: Rc::new(FrappeClient::new(config.backend.clone())),
		surface: RwSignal::new(None),
		documents: RwSignal::new(Vec::new()),
		document_input: RwSignal::new(String::new()),
		notices: NoticeQueue::new(),
	};
	let (surface, documents, document_input, notices) = (
		handle.surface,
		handle.documents,
		handle.document_input,
		handle.notices,
	);
	let graph_config = config.graph.clone();

	let handle_doctype = handle.clone();
	let on_doctype = move |evt: ev::Event| {
		let doctype = Doctype::from_name(&event_target_value(&evt));
		let action = handle_doctype.controller.borrow_mut().select_doctype(doctype);
		handle_doctype.dispatch(action);
	};

	let handle_document = handle.clone();
	let on_document = move |evt: ev::Event| {
		let value = event_target_value(&evt);
		document_input.set(value.clone());
		let action = handle_document.controller.borrow_mut().select_document(&value);
		handle_document.dispatch(action);
	};

	let handle_refresh = handle.clone();
	let on_refresh = move |_: ev::MouseEvent| {
		let action = handle_refresh.controller.borrow_mut().refresh();
		handle_refresh.dispatch(action);
	};

	view! {
		<div class="document-flow">
			<div class="document-flow-toolbar">
				<label>
					"Document Type"
					<select on:change=on_doctype>
						<option value="">"Select..."</option>
						{Doctype::ALL
							.into_iter()
							.map(|d| view! { <option value=d.name()>{d.name()}</option> })
							.collect_view()}
					</select>
				</label>
				<label>
					"Document"
					<input
						type="text"
						list="document-flow-options"
						placeholder="Submitted document"
						prop:value=move || document_input.get()
						on:change=on_document
					/>
					<datalist id="document-flow-options">
						<For
							each=move || documents.get()
							key=|name| name.clone()
							children=|name: String| view! { <option value=name></option> }
						/>
					</datalist>
				</label>
				<button on:click=on_refresh>"Refresh"</button>
			</div>

			<div class="document-flow-surface">
				{move || {
					surface
						.get()
						.map(|graph| {
							view! { <ForceGraphCanvas graph=graph config=graph_config.clone() /> }
						})
				}}
				<div class="graph-overlay">
					<p class="subtitle">
						"Drag nodes to reposition. Scroll to zoom. Drag background to pan."
					</p>
				</div>
			</div>

			<NoticeStack queue=notices />
		</div>
	}
}
