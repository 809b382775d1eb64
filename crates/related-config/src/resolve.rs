//! Resolution of `posts.path` and `cache.dir` values.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Turns a path written in a config file into an absolute one.
///
/// `~` and `~/...` expand against the home directory, relative paths join onto `config_dir`
/// (the directory of the file that set them). Paths that exist are canonicalized. A missing
/// path comes back joined but unresolved so validation can report it.
pub fn resolve_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = match path.strip_prefix('~') {
        Some("") => home_dir()?,
        Some(rest) if rest.starts_with('/') => home_dir()?.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    };

    let absolute = config_dir.join(expanded);
    Ok(absolute.canonicalize().unwrap_or(absolute))
}

/// Home directory from the platform's base dirs.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SiteFixture;

    #[test]
    fn test_resolve_relative_path() {
        let site = SiteFixture::new();
        let blog = site.dir("blog");

        let resolved = resolve_path("./blog", site.path()).unwrap();
        assert_eq!(resolved, blog.canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_relative_path_without_dot() {
        let site = SiteFixture::new();
        let blog = site.dir("content/blog");

        let resolved = resolve_path("content/blog", site.path()).unwrap();
        assert_eq!(resolved, blog.canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_missing_path_is_joined() {
        let site = SiteFixture::new();
        let resolved = resolve_path("./nope", site.path()).unwrap();
        assert_eq!(resolved, site.path().join("./nope"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let site = SiteFixture::new();
        let blog = site.dir("blog");
        let config_dir = site.dir("elsewhere");

        let resolved = resolve_path(blog.to_str().unwrap(), &config_dir).unwrap();
        assert_eq!(resolved, blog.canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_tilde() {
        let site = SiteFixture::new();
        if let Some(dirs) = BaseDirs::new() {
            let home = dirs.home_dir();
            let expected = |p: PathBuf| p.canonicalize().unwrap_or(p);
            assert_eq!(
                resolve_path("~", site.path()).unwrap(),
                expected(home.to_path_buf())
            );
            assert_eq!(
                resolve_path("~/blog", site.path()).unwrap(),
                expected(home.join("blog"))
            );
        }
    }

    #[test]
    fn test_tilde_inside_name_is_literal() {
        let site = SiteFixture::new();
        let resolved = resolve_path("~drafts", site.path()).unwrap();
        assert_eq!(resolved, site.path().join("~drafts"));
    }
}
