pub mod document_flow;
pub mod not_found;
