//! Command-line front end.

mod context;
mod flags;
mod key;
mod prompts;

pub use context::{Context, Outcome};
pub use flags::CliFlags;
pub use key::{KeySource, read_first_line};
pub use prompts::error as print_error;

/// Run the CLI with parsed flags.
pub fn run(flags: CliFlags) -> anyhow::Result<Outcome> {
    Context::new(flags).run()
}
