//! Data models module
//!
//! Defines the gateway's request and response structures and the wire formats of each vendor API

pub mod api;
pub mod claude;
pub mod gemini;
pub mod openai;

pub use api::*;
