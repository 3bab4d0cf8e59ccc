use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::PayloadError;

/// One linked document; holds at least the value keyed by its category.
pub type Connection = Map<String, Value>;

/// Kinds of downstream documents a top-level item can link to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	SalesInvoice,
	DeliveryNote,
	MaterialRequest,
	PurchaseOrder,
}

impl Category {
	pub const ALL: [Category; 4] = [
		Category::SalesInvoice,
		Category::DeliveryNote,
		Category::MaterialRequest,
		Category::PurchaseOrder,
	];

	/// Lower-cased key of the value inside a connection, also the node id prefix.
	pub fn key(self) -> &'static str {
		match self {
			Category::SalesInvoice => "sales_invoice",
			Category::DeliveryNote => "delivery_note",
			Category::MaterialRequest => "material_request",
			Category::PurchaseOrder => "purchase_order",
		}
	}
}

/// A top-level item of the root document with its categorized connections.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BackendItem {
	pub item_code: String,
	#[serde(default)]
	pub item_name: String,
	#[serde(default)]
	pub sales_invoices: Vec<Connection>,
	#[serde(default)]
	pub delivery_notes: Vec<Connection>,
	#[serde(default)]
	pub material_requests: Vec<Connection>,
	#[serde(default)]
	pub purchase_orders: Vec<Connection>,
}

impl BackendItem {
	pub fn connections(&self, category: Category) -> &[Connection] {
		match category {
			Category::SalesInvoice => &self.sales_invoices,
			Category::DeliveryNote => &self.delivery_notes,
			Category::MaterialRequest => &self.material_requests,
			Category::PurchaseOrder => &self.purchase_orders,
		}
	}

	pub fn connection_count(&self) -> usize {
		Category::ALL
			.into_iter()
			.map(|c| self.connections(c).len())
			.sum()
	}
}

/// Value a connection holds for `category`; numbers keep their JSON text.
pub fn connection_value(connection: &Connection, category: Category) -> Option<String> {
	match connection.get(category.key())? {
		Value::String(s) => Some(s.clone()),
		Value::Null => None,
		other => Some(other.to_string()),
	}
}

/// Extract the item list from a link response.
pub fn parse_items(payload: Value) -> Result<Vec<BackendItem>, PayloadError> {
	let Value::Object(mut body) = payload else {
		return Err(PayloadError::MissingItems);
	};
	match body.remove("items") {
		None | Some(Value::Null) => Err(PayloadError::MissingItems),
		Some(Value::Array(items)) if items.is_empty() => Err(PayloadError::Empty),
		Some(Value::Array(items)) => items
			.into_iter()
			.map(serde_json::from_value)
			.collect::<Result<Vec<BackendItem>, _>>()
			.map_err(PayloadError::from),
		Some(_) => Err(PayloadError::NotAnArray),
	}
}
