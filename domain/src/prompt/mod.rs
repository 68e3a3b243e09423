//! Prompt domain
//!
//! Templates for every prompt the review and debate protocols send.

mod template;

pub use template::PromptTemplate;
