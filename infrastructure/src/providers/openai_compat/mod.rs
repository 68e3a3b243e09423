//! OpenAI-compatible chat completions provider
//!
//! Serves OpenAI models directly and Gemini models through Google's
//! OpenAI-compatible endpoint. Structured replies are requested with a
//! `json_schema` response format compiled from the reply type.

mod adapter;
mod session;
mod types;

pub use adapter::{GEMINI_BASE_URL, OPENAI_BASE_URL, OpenAiCompatProvider, ProviderSettings};
pub use session::OpenAiCompatSession;
