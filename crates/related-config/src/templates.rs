//! Configuration templates for `related init`.
//!
//! Both templates live in `templates/` as plain TOML listing the defaults, so tests can check
//! they parse. `related init` writes them fully commented out: a fresh file changes nothing
//! until the user uncomments a setting.

/// Per-site template.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Template for `~/.related.toml`.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// The per-site template, commented out.
pub fn local_template() -> String {
    commented(LOCAL_TEMPLATE)
}

/// The global template, commented out.
pub fn global_template() -> String {
    commented(GLOBAL_TEMPLATE)
}

/// Prefixes every setting and section line with `# `, leaving comments and blank lines alone.
fn commented(template: &str) -> String {
    template
        .lines()
        .map(|line| match line.chars().next() {
            None | Some('#') => format!("{line}\n"),
            Some(_) => format!("# {line}\n"),
        })
        .collect()
}
