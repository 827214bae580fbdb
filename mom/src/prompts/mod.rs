//! Prompt Templates
//!
//! The interview and minutes instructions live in `.pmt` files rather than
//! in code.
//!
//! Template loading chain:
//! 1. `{prompts-dir}/{name}.pmt` (configured override)
//! 2. `.mombot/prompts/{name}.pmt` (project override)
//! 3. Embedded fallback in the binary

pub mod embedded;
mod loader;

pub use loader::PromptLoader;
