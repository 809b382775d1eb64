//! Implementation of `related init`.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use related_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};
use related_highlight::TomlHighlighter;

use crate::cli::{args::InitCommand, context::CommandContext, output::subheader};

/// Where `init` writes, and which template it uses.
enum Scope {
    /// `~/.related.toml`.
    Global(PathBuf),
    /// `.related.toml` in the working directory.
    Local(PathBuf),
}

impl Scope {
    /// Picks the global file when asked for, or when run from the home directory.
    fn choose(ctx: &CommandContext, global: bool) -> Result<Self, ExitCode> {
        let home_config = global_config_path();
        let in_home = home_config
            .as_deref()
            .and_then(|p| p.parent())
            .is_some_and(|home| home == ctx.cwd);

        if !(global || in_home) {
            return Ok(Self::Local(ctx.cwd.join(CONFIG_FILENAME)));
        }
        home_config.map(Self::Global).ok_or_else(|| {
            eprintln!("error: could not determine home directory");
            ExitCode::FAILURE
        })
    }

    /// Path of the config file.
    fn path(&self) -> &Path {
        match self {
            Self::Global(path) | Self::Local(path) => path,
        }
    }

    /// Commented template for this scope.
    fn template(&self) -> String {
        match self {
            Self::Global(_) => global_template(),
            Self::Local(_) => local_template(),
        }
    }
}

/// Writes a commented `.related.toml` template.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let scope = match Scope::choose(ctx, cmd.global) {
        Ok(scope) => scope,
        Err(code) => return code,
    };
    let path = scope.path();

    if path.exists() && !cmd.force {
        eprintln!("error: configuration file already exists: {}", path.display());
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = scope.template();
    if let Err(e) = fs::write(path, &template) {
        eprintln!("error: failed to write {}: {e}", path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    print!("{}", TomlHighlighter::new().highlight(&template));
    ExitCode::SUCCESS
}
