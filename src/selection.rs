//! Root selection state and the fetch/rebuild cycle it drives.

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::backend::{Doctype, FetchError, Resolver, parse_items};
use crate::components::force_graph::{GraphBuilder, GraphData};
use crate::notice::Notice;

pub const MISSING_SELECTION: &str = "Please select a document type and a document first.";
pub const NOTHING_TO_DISPLAY: &str = "No items to display.";
pub const TERMINAL_NODE: &str = "This is the last node.";

/// Identifies one rebuild attempt; responses carrying an older ticket are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
	pub ticket: Ticket,
	pub resolver: Resolver,
	pub document: String,
}

/// What the page must do after a selection change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
	Idle,
	/// The doctype changed: clear the surface and reload document options.
	Reconfigure(Option<Doctype>),
	/// The selection became incomplete: drop the surface without a notice.
	Clear,
	/// Nothing to fetch; clear the surface and tell the user.
	Notify(Notice),
	/// Clear the surface and resolve links.
	Fetch(FetchRequest),
}

/// Result of a finished fetch.
#[derive(Debug, PartialEq)]
pub enum Completion {
	/// A newer selection superseded this response.
	Stale,
	Render { ticket: Ticket, graph: GraphData },
	Notify(Notice),
}

/// Owns the current doctype/document pair and the rebuild generation.
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
	doctype: Option<Doctype>,
	document: Option<String>,
	generation: u64,
	builder: GraphBuilder,
}

impl SelectionController {
	pub fn new(builder: GraphBuilder) -> Self {
		Self {
			builder,
			..Self::default()
		}
	}

	pub fn doctype(&self) -> Option<Doctype> {
		self.doctype
	}

	#[cfg(test)]
	pub fn document(&self) -> Option<&str> {
		self.document.as_deref()
	}

	pub fn select_doctype(&mut self, doctype: Option<Doctype>) -> Action {
		if doctype == self.doctype {
			return Action::Idle;
		}
		self.doctype = doctype;
		self.document = None;
		self.generation += 1;
		Action::Reconfigure(doctype)
	}

	pub fn select_document(&mut self, document: &str) -> Action {
		let document = Some(document.trim())
			.filter(|d| !d.is_empty())
			.map(str::to_string);
		if document == self.document {
			return Action::Idle;
		}
		self.document = document;
		self.rebuild(false)
	}

	/// Explicit user request to rebuild the current selection.
	pub fn refresh(&mut self) -> Action {
		self.rebuild(true)
	}

	fn rebuild(&mut self, explicit: bool) -> Action {
		self.generation += 1;
		let (Some(doctype), Some(document)) = (self.doctype, self.document.clone()) else {
			return if explicit {
				Action::Notify(Notice::warning(MISSING_SELECTION))
			} else {
				Action::Clear
			};
		};
		match doctype.resolver() {
			Some(resolver) => {
				info!("resolving links for {} {}", doctype, document);
				Action::Fetch(FetchRequest {
					ticket: Ticket(self.generation),
					resolver,
					document,
				})
			}
			None => Action::Notify(Notice::info(TERMINAL_NODE)),
		}
	}

	pub fn is_current(&self, ticket: Ticket) -> bool {
		ticket.0 == self.generation
	}

	pub fn complete(&self, ticket: Ticket, result: Result<Value, FetchError>) -> Completion {
		if !self.is_current(ticket) {
			debug!("discarding stale response for generation {}", ticket.0);
			return Completion::Stale;
		}
		let payload = match result {
			Ok(payload) => payload,
			Err(e) => {
				error!("link resolution failed: {e}");
				return Completion::Notify(Notice::error(format!(
					"Could not load linked documents: {e}"
				)));
			}
		};
		match parse_items(payload) {
			Ok(items) => Completion::Render {
				ticket,
				graph: self.builder.build(&items),
			},
			Err(e) => {
				warn!("nothing to render: {e}");
				Completion::Notify(Notice::warning(NOTHING_TO_DISPLAY))
			}
		}
	}
}
