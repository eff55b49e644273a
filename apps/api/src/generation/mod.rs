//! Letter generation: prompt construction, pipeline orchestration, handlers.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
