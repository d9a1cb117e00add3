//! Named text resources: compiled-in defaults with an optional directory override.

use crate::errors::{AopError, AopResult};
use std::collections::BTreeMap;
use std::path::{self, Path, PathBuf};

/// Loads text resources by name
#[derive(Debug, Clone, Default)]
pub struct ResourceLoader {
    bundled: BTreeMap<String, &'static str>,
    base_dir: Option<PathBuf>,
}

impl ResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a compiled-in resource
    pub fn with_bundled(mut self, name: &str, content: &'static str) -> Self {
        self.bundled.insert(normalize(name).to_string(), content);
        self
    }

    /// Look in `dir` before falling back to bundled resources
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Check if a resource can be loaded
    pub fn exists(&self, name: &str) -> bool {
        let name = normalize(name);
        if !is_contained(name) {
            return false;
        }
        self.override_path(name).map(|p| p.is_file()).unwrap_or(false)
            || self.bundled.contains_key(name)
    }

    /// Load a resource verbatim. A leading `/` in the name is ignored; names
    /// with `..` components are rejected.
    pub fn load(&self, name: &str) -> AopResult<String> {
        let name = normalize(name);
        if !is_contained(name) {
            return Err(AopError::InvalidResourceName {
                name: name.to_string(),
            });
        }

        if let Some(path) = self.override_path(name) {
            if path.is_file() {
                tracing::debug!(resource = name, path = %path.display(), "Loading resource from disk");
                return Ok(std::fs::read_to_string(path)?);
            }
        }

        self.bundled
            .get(name)
            .map(|content| {
                tracing::debug!(resource = name, "Loading bundled resource");
                content.to_string()
            })
            .ok_or_else(|| AopError::ResourceNotFound {
                name: name.to_string(),
            })
    }

    fn override_path(&self, name: &str) -> Option<PathBuf> {
        self.base_dir.as_ref().map(|dir| dir.join(name))
    }
}

fn normalize(name: &str) -> &str {
    name.trim_start_matches('/')
}

fn is_contained(name: &str) -> bool {
    Path::new(name)
        .components()
        .all(|c| matches!(c, path::Component::Normal(_) | path::Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_resource() {
        let loader = ResourceLoader::new().with_bundled("message", "hi there\n");

        assert_eq!(loader.load("/message").unwrap(), "hi there\n");
        assert_eq!(loader.load("message").unwrap(), "hi there\n");
        assert!(loader.exists("/message"));
    }

    #[test]
    fn test_missing_resource() {
        let loader = ResourceLoader::new();
        assert!(matches!(
            loader.load("/nope"),
            Err(AopError::ResourceNotFound { ref name }) if name == "nope"
        ));
        assert!(!loader.exists("nope"));
    }

    #[test]
    fn test_directory_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("message"), "from disk").unwrap();

        let loader = ResourceLoader::new()
            .with_bundled("message", "bundled")
            .with_bundled("other", "bundled other")
            .with_base_dir(dir.path());

        assert_eq!(loader.load("/message").unwrap(), "from disk");
        assert_eq!(loader.load("other").unwrap(), "bundled other");
    }

    #[test]
    fn test_parent_components_are_rejected() {
        let root = tempfile::tempdir().unwrap();
        let base = root.path().join("resources");
        std::fs::create_dir(&base).unwrap();
        std::fs::write(root.path().join("secret"), "outside").unwrap();

        let loader = ResourceLoader::new()
            .with_bundled("message", "bundled")
            .with_base_dir(&base);

        assert!(matches!(
            loader.load("../secret"),
            Err(AopError::InvalidResourceName { ref name }) if name == "../secret"
        ));
        assert!(matches!(
            loader.load("/nested/../../secret"),
            Err(AopError::InvalidResourceName { .. })
        ));
        assert!(!loader.exists("../secret"));
        assert_eq!(loader.load("message").unwrap(), "bundled");
    }
}
