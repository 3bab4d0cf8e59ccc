use thiserror::Error;

/// Failure talking to the backend.
#[derive(Debug, Error)]
pub enum FetchError {
	#[error("browser window is not available")]
	NoWindow,
	#[error("request failed: {0}")]
	Request(String),
	#[error("server responded with HTTP {0}")]
	Http(u16),
	#[error("could not decode response: {0}")]
	Decode(String),
}

/// A link response that cannot be turned into a graph.
#[derive(Debug, Error)]
pub enum PayloadError {
	#[error("response has no `items` field")]
	MissingItems,
	#[error("`items` is not an array")]
	NotAnArray,
	#[error("`items` is empty")]
	Empty,
	#[error("malformed item: {0}")]
	Malformed(#[from] serde_json::Error),
}
