use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateStoreError {
    #[error("Template `{name}` not found: `{reason}`")]
    NotFound { name: String, reason: String },
    #[error("Invalid template name `{0}`")]
    InvalidName(String),
}

/// Lookup of HTML templates by logical name.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait TemplateStore: Send + Sync {
    fn get_template(&self, name: &str) -> Result<String, TemplateStoreError>;
}

/// Templates stored as `<directory>/<name>.html`.
pub struct FileTemplateStore {
    directory: PathBuf,
}

impl FileTemplateStore {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

impl TemplateStore for FileTemplateStore {
    fn get_template(&self, name: &str) -> Result<String, TemplateStoreError> {
        // logical names only, no path traversal out of the template directory
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(TemplateStoreError::InvalidName(name.to_owned()));
        }

        let path = self.directory.join(format!("{name}.html"));
        std::fs::read_to_string(&path).map_err(|e| TemplateStoreError::NotFound {
            name: name.to_owned(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_get_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("credential-template.html"),
            "<h1>{{ titleName }}</h1>",
        )
        .unwrap();

        let store = FileTemplateStore::new(dir.path().to_path_buf());

        assert_eq!(
            store.get_template("credential-template").unwrap(),
            "<h1>{{ titleName }}</h1>"
        );
        assert!(matches!(
            store.get_template("other"),
            Err(TemplateStoreError::NotFound { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("../secret")]
    #[case(".hidden")]
    #[case("nested/template")]
    fn test_invalid_template_name(#[case] name: &str) {
        let store = FileTemplateStore::new(PathBuf::from("/nonexistent"));

        assert!(matches!(
            store.get_template(name),
            Err(TemplateStoreError::InvalidName(_))
        ));
    }
}
