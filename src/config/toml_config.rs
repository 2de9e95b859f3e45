use crate::core::catalog::SectionCatalog;
use crate::domain::model::Template;
use crate::utils::error::{Result, StudioError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_STORAGE_DIR: &str = "./.wiki-studio";
pub const DEFAULT_STORAGE_KEY: &str = "WikiStudio-draft";
pub const DEFAULT_NOTICE_SECONDS: u64 = 3;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    pub editor: Option<EditorConfig>,
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_directory")]
    pub directory: String,
    #[serde(default = "default_key")]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub template: Option<Template>,
    pub notice_seconds: Option<u64>,
}

/// Replaces the template's optional-section list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub sections: Vec<String>,
}

fn default_directory() -> String {
    DEFAULT_STORAGE_DIR.to_string()
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            key: default_key(),
        }
    }
}

impl StudioConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StudioError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| StudioError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DRAFT_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn template(&self) -> Template {
        self.editor
            .as_ref()
            .and_then(|e| e.template)
            .unwrap_or_default()
    }

    pub fn set_template(&mut self, template: Template) {
        match self.editor.as_mut() {
            Some(editor) => editor.template = Some(template),
            None => {
                self.editor = Some(EditorConfig {
                    template: Some(template),
                    notice_seconds: None,
                })
            }
        }
    }

    pub fn notice_duration(&self) -> Duration {
        let seconds = self
            .editor
            .as_ref()
            .and_then(|e| e.notice_seconds)
            .unwrap_or(DEFAULT_NOTICE_SECONDS);
        Duration::from_secs(seconds)
    }

    /// Configured catalog if present, otherwise the template's own.
    pub fn catalog(&self) -> SectionCatalog {
        match &self.catalog {
            Some(catalog) => SectionCatalog::new(catalog.sections.clone()),
            None => SectionCatalog::for_template(self.template()),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("storage.directory", &self.storage.directory)?;
        validation::validate_storage_key("storage.key", &self.storage.key)?;

        if let Some(seconds) = self.editor.as_ref().and_then(|e| e.notice_seconds) {
            validation::validate_range("editor.notice_seconds", seconds, 1, 60)?;
        }

        if let Some(catalog) = &self.catalog {
            validation::validate_unique_names("catalog.sections", &catalog.sections)?;
        }

        Ok(())
    }
}

impl Validate for StudioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
directory = "./drafts"
key = "my-draft"

[editor]
template = "person"
notice_seconds = 5

[catalog]
sections = ["Early Life", "Career"]
"#;

        let config = StudioConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.storage.directory, "./drafts");
        assert_eq!(config.storage.key, "my-draft");
        assert_eq!(config.template(), Template::Person);
        assert_eq!(config.notice_duration(), Duration::from_secs(5));
        assert_eq!(config.catalog().names().len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = StudioConfig::from_toml_str("").unwrap();

        assert_eq!(config.storage.directory, DEFAULT_STORAGE_DIR);
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.template(), Template::Account);
        assert_eq!(config.notice_duration(), Duration::from_secs(3));
        assert_eq!(config.catalog(), SectionCatalog::for_template(Template::Account));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WIKI_STUDIO_TEST_DIR", "/tmp/wiki-drafts");

        let toml_content = r#"
[storage]
directory = "${WIKI_STUDIO_TEST_DIR}"
"#;

        let config = StudioConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.directory, "/tmp/wiki-drafts");

        std::env::remove_var("WIKI_STUDIO_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_key = StudioConfig::from_toml_str("[storage]\nkey = \"a/b\"\n").unwrap();
        assert!(bad_key.validate().is_err());

        let bad_notice =
            StudioConfig::from_toml_str("[editor]\nnotice_seconds = 0\n").unwrap();
        assert!(bad_notice.validate().is_err());

        let dupes =
            StudioConfig::from_toml_str("[catalog]\nsections = [\"Idea\", \"Idea\"]\n").unwrap();
        assert!(dupes.validate().is_err());
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        assert!(StudioConfig::from_toml_str("[editor]\ntemplate = \"recipe\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[editor]\ntemplate = \"organization\"\n")
            .unwrap();

        let config = StudioConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.template(), Template::Organization);
    }
}
