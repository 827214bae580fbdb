//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Interviewer instructions: essential, optional and closing questions
pub const INTERVIEW: &str = include_str!("../../prompts/interview.pmt");

/// Meeting Minutes document instructions
pub const MOM: &str = include_str!("../../prompts/mom.pmt");

/// User message wrapping the formatted transcript (Handlebars)
pub const MOM_USER: &str = include_str!("../../prompts/mom-user.pmt");

/// Names of every embedded prompt, in display order
pub const NAMES: &[&str] = &["interview", "mom", "mom-user"];

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "interview" => Some(INTERVIEW),
        "mom" => Some(MOM),
        "mom-user" => Some(MOM_USER),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
