#[macro_export]
macro_rules! profile {
  ($name:expr) => {{
    let _span = tracing::span!(tracing::Level::DEBUG, $name);
    let _enter = _span.enter();
  }};
}

pub mod anthropic;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod llm;
pub mod model;
pub mod openai;
pub mod summary;

// Re-exports
pub use error::HelperError;
