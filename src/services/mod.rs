//! Service layer module
//!
//! Contains the model router, the API key store and text extraction

pub mod extractor;
pub mod keystore;
pub mod router;

pub use extractor::{extract_text, DocumentKind};
pub use keystore::KeyStore;
pub use router::{estimate_cost, estimate_tokens, ModelRouter, ProviderTable};
