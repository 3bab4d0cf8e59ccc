use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::form_urlencoded;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, RequestMode, Response};

use super::doctype::{Doctype, Resolver};
use super::error::FetchError;
use crate::config::BackendConfig;

const DOCUMENT_LIST_LIMIT: &str = "50";

/// Whitelisted methods wrap their return value in `message`.
#[derive(Deserialize)]
struct MethodEnvelope<T> {
	#[serde(default)]
	message: T,
}

#[derive(Deserialize)]
struct NamedRow {
	name: String,
}

/// Browser fetch client for the link-resolving backend.
#[derive(Clone, Debug)]
pub struct FrappeClient {
	config: BackendConfig,
}

impl FrappeClient {
	pub fn new(config: BackendConfig) -> Self {
		Self { config }
	}

	fn method_url(&self, method: &str, params: &[(&str, &str)]) -> String {
		let query = form_urlencoded::Serializer::new(String::new())
			.extend_pairs(params)
			.finish();
		format!("{}/api/method/{}?{}", self.config.base_url, method, query)
	}

	pub fn resolve_links_url(&self, resolver: Resolver, document: &str) -> String {
		let method = format!("{}.{}", self.config.api_module, resolver.method());
		self.method_url(&method, &[("document_name", document)])
	}

	pub fn submitted_documents_url(&self, doctype: Doctype) -> String {
		self.method_url(
			"frappe.client.get_list",
			&[
				("doctype", doctype.name()),
				("filters", r#"[["docstatus","=",1]]"#),
				("fields", r#"["name"]"#),
				("order_by", "modified desc"),
				("limit_page_length", DOCUMENT_LIST_LIMIT),
			],
		)
	}

	/// Raw link response for `document`; shape checks happen in `parse_items`.
	pub async fn resolve_links(&self, resolver: Resolver, document: &str) -> Result<Value, FetchError> {
		let envelope: MethodEnvelope<Value> =
			self.get(&self.resolve_links_url(resolver, document)).await?;
		Ok(envelope.message)
	}

	/// Names of finalized documents of `doctype`, newest first.
	pub async fn list_submitted(&self, doctype: Doctype) -> Result<Vec<String>, FetchError> {
		let envelope: MethodEnvelope<Vec<NamedRow>> =
			self.get(&self.submitted_documents_url(doctype)).await?;
		Ok(envelope.message.into_iter().map(|row| row.name).collect())
	}

	async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
		let opts = RequestInit::new();
		opts.set_method("GET");
		opts.set_mode(RequestMode::Cors);
		opts.set_credentials(RequestCredentials::Include);

		let request = Request::new_with_str_and_init(url, &opts)
			.map_err(|e| FetchError::Request(js_error(&e)))?;
		request
			.headers()
			.set("Accept", "application/json")
			.map_err(|e| FetchError::Request(js_error(&e)))?;

		let window = web_sys::window().ok_or(FetchError::NoWindow)?;
		let resp_value = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(|e| FetchError::Request(js_error(&e)))?;
		let resp: Response = resp_value
			.dyn_into()
			.map_err(|_| FetchError::Decode("response is not a Response".into()))?;

		if !resp.ok() {
			return Err(FetchError::Http(resp.status()));
		}

		let body = JsFuture::from(resp.text().map_err(|e| FetchError::Decode(js_error(&e)))?)
			.await
			.map_err(|e| FetchError::Decode(js_error(&e)))?;
		let body = body
			.as_string()
			.ok_or_else(|| FetchError::Decode("response body is not text".into()))?;

		serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
	}
}

fn js_error(value: &JsValue) -> String {
	value
		.as_string()
		.unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn client() -> FrappeClient {
		FrappeClient::new(BackendConfig {
			base_url: "https://erp.example.com".into(),
			api_module: "document_flow.api".into(),
		})
	}

	#[test]
	fn resolver_url_uses_method_table_and_encodes_name() {
		let url = client().resolve_links_url(Resolver::SalesOrderLinks, "SO 0001/A");
		assert_eq!(
			url,
			"https://erp.example.com/api/method/document_flow.api.get_sales_order_links?document_name=SO+0001%2FA"
		);
	}

	#[test]
	fn document_list_url_filters_submitted() {
		let url = client().submitted_documents_url(Doctype::PurchaseOrder);
		assert!(url.starts_with("https://erp.example.com/api/method/frappe.client.get_list?"));
		assert!(url.contains("doctype=Purchase+Order"));
		assert!(url.contains("filters=%5B%5B%22docstatus%22%2C%22%3D%22%2C1%5D%5D"));
		assert!(url.contains("fields=%5B%22name%22%5D"));
		assert!(url.contains("order_by=modified+desc"));
		assert!(url.ends_with("limit_page_length=50"));
	}

	#[test]
	fn document_list_rows_come_from_message() {
		let envelope: MethodEnvelope<Vec<NamedRow>> =
			serde_json::from_str(r#"{"message": [{"name": "PO-0002"}, {"name": "PO-0001"}]}"#).unwrap();
		let names: Vec<String> = envelope.message.into_iter().map(|row| row.name).collect();
		assert_eq!(names, ["PO-0002", "PO-0001"]);
	}

	#[test]
	fn missing_message_decodes_as_null() {
		let envelope: MethodEnvelope<Value> = serde_json::from_str("{}").unwrap();
		assert!(envelope.message.is_null());
	}
}
