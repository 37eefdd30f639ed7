pub mod input;
pub mod session;
pub mod setup;
pub mod ui;

pub use input::{FlagSource, Input, PromptSource, RequestSource};
pub use session::{SessionSummary, run_session};
