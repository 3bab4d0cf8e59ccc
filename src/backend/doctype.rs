use std::fmt;

/// Document types the picker offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Doctype {
	SalesOrder,
	MaterialRequest,
	PurchaseOrder,
	DeliveryNote,
	SalesInvoice,
}

impl Doctype {
	pub const ALL: [Doctype; 5] = [
		Doctype::SalesOrder,
		Doctype::MaterialRequest,
		Doctype::PurchaseOrder,
		Doctype::DeliveryNote,
		Doctype::SalesInvoice,
	];

	pub fn name(self) -> &'static str {
		match self {
			Doctype::SalesOrder => "Sales Order",
			Doctype::MaterialRequest => "Material Request",
			Doctype::PurchaseOrder => "Purchase Order",
			Doctype::DeliveryNote => "Delivery Note",
			Doctype::SalesInvoice => "Sales Invoice",
		}
	}

	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|d| d.name() == name)
	}

	/// Remote method that expands this doctype. `None` marks a terminal node.
	pub fn resolver(self) -> Option<Resolver> {
		match self {
			Doctype::SalesOrder => Some(Resolver::SalesOrderLinks),
			Doctype::MaterialRequest => Some(Resolver::MaterialRequestLinks),
			Doctype::PurchaseOrder => Some(Resolver::PurchaseOrderLinks),
			Doctype::DeliveryNote | Doctype::SalesInvoice => None,
		}
	}
}

impl fmt::Display for Doctype {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Server-side methods returning `{ items: [...] }` for a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolver {
	SalesOrderLinks,
	MaterialRequestLinks,
	PurchaseOrderLinks,
}

impl Resolver {
	pub fn method(self) -> &'static str {
		match self {
			Resolver::SalesOrderLinks => "get_sales_order_links",
			Resolver::MaterialRequestLinks => "get_material_request_links",
			Resolver::PurchaseOrderLinks => "get_purchase_order_links",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_round_trip_through_allow_list() {
		for doctype in Doctype::ALL {
			assert_eq!(Doctype::from_name(doctype.name()), Some(doctype));
		}
		assert_eq!(Doctype::from_name("Journal Entry"), None);
		assert_eq!(Doctype::from_name("sales order"), None);
	}

	#[test]
	fn invoices_and_delivery_notes_are_terminal() {
		assert_eq!(Doctype::SalesInvoice.resolver(), None);
		assert_eq!(Doctype::DeliveryNote.resolver(), None);
		assert_eq!(
			Doctype::SalesOrder.resolver().map(Resolver::method),
			Some("get_sales_order_links")
		);
	}
}
