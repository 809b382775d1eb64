//! Implementation of `related config`.

use std::process::ExitCode;

use related_highlight::TomlHighlighter;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let toml = match ctx.config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    print!("{}", TomlHighlighter::new().highlight(&toml));
    ExitCode::SUCCESS
}
