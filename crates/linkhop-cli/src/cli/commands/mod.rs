//! CLI command handlers. Each command is in its own file.

mod completions;
mod resolve;
mod serve;

pub use completions::{run_completions, run_man};
pub use resolve::{run_resolve, ResolveArgs};
pub use serve::{run_serve, ServeArgs};
