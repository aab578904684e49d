use crate::result::{Result, SealError};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const DEFAULT_CONFIG_FILE: &str = ".pyseal.toml";
pub const DEFAULT_BUILD_DIR: &str = "build";
pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_COPY_IGNORES: &[&str] =
    &["venv", "logs", ".git", ".idea", ".vscode", "__pycache__"];

/// A list value in the config file: either `"a b c"` or `["a", "b", "c"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WordList {
    Joined(String),
    Items(Vec<String>),
}

impl WordList {
    pub fn words(&self) -> Vec<String> {
        match self {
            WordList::Joined(text) => text.split_whitespace().map(str::to_string).collect(),
            WordList::Items(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// `None` when the list holds no words; empty values count as unset.
    fn non_empty(list: &Option<WordList>) -> Option<Vec<String>> {
        list.as_ref().map(WordList::words).filter(|w| !w.is_empty())
    }
}

/** File-backed settings, read from the `[pyseal]` table
 *
 * # Format
 * ```toml
 * [pyseal]
 * paths = "app lib"
 * ignores = ["tests/", "migrations/"]
 * copy_ignores = "venv .git *.log"
 * build_dir = "dist"
 * clean_py = true
 * python = "python3.12"
 * ```
 *
 * Every key is optional. Paths are relative to the working directory.
 */
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FileSettings {
    pub paths: Option<WordList>,
    pub ignores: Option<WordList>,
    pub copy_ignores: Option<WordList>,
    pub build_dir: Option<PathBuf>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub clean_py: Option<bool>,
    pub python: Option<String>,
}

/// Accepts `true`, `1`, `"yes"`, `"on"` and their negatives. Any other value
/// drops the key alone instead of the whole file.
fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<toml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| {
        let flag = match &value {
            toml::Value::Boolean(flag) => Some(*flag),
            toml::Value::Integer(1) => Some(true),
            toml::Value::Integer(0) => Some(false),
            toml::Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "1" | "yes" | "true" | "on" => Some(true),
                "0" | "no" | "false" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        };
        if flag.is_none() {
            log::warn!("Ignoring invalid clean_py value: {:?}", value);
        }
        flag
    }))
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    pyseal: Option<FileSettings>,
}

impl FileSettings {
    pub fn parse(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.pyseal.unwrap_or_default())
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        Self::parse(&content).map_err(|e| {
            SealError::config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Missing or broken config files mean "no config"; never an error.
    pub async fn load_or_default(path: &Path) -> Self {
        if !path.is_file() {
            log::debug!("No config file at {}", path.display());
            return Self::default();
        }

        match Self::from_file(path).await {
            Ok(settings) => {
                log::info!("Loaded config from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }
}

/// Values given explicitly on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub paths: Option<Vec<PathBuf>>,
    pub build_dir: Option<PathBuf>,
    pub ignores: Option<Vec<String>>,
    pub copy_ignores: Option<Vec<String>>,
    pub clean_source: Option<bool>,
    pub python: Option<String>,
}

/// Fully resolved settings for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub paths: Vec<PathBuf>,
    pub build_dir: PathBuf,
    pub ignores: Vec<String>,
    pub copy_ignores: Vec<String>,
    pub clean_source: bool,
    pub python: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(".")],
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            ignores: Vec::new(),
            copy_ignores: DEFAULT_COPY_IGNORES.iter().map(|s| s.to_string()).collect(),
            clean_source: false,
            python: DEFAULT_PYTHON.to_string(),
        }
    }
}

impl Settings {
    /** Resolves every field as `override -> file -> built-in default`
     *
     * # Rules
     * - An override wins whenever it is `Some`, even `Some(false)`
     * - Empty file values (`""`, `[]`) fall through to the default
     * - An explicitly given empty path list falls through as well, since
     *   compiling nothing is never what an empty `run` means
     */
    pub fn resolve(file: &FileSettings, overrides: &Overrides) -> Self {
        let defaults = Self::default();

        let paths = overrides
            .paths
            .clone()
            .filter(|paths| !paths.is_empty())
            .or_else(|| {
                WordList::non_empty(&file.paths)
                    .map(|words| words.into_iter().map(PathBuf::from).collect())
            })
            .unwrap_or(defaults.paths);

        let build_dir = overrides
            .build_dir
            .clone()
            .or_else(|| file.build_dir.clone().filter(|dir| !dir.as_os_str().is_empty()))
            .unwrap_or(defaults.build_dir);

        let ignores = overrides
            .ignores
            .clone()
            .or_else(|| WordList::non_empty(&file.ignores))
            .unwrap_or(defaults.ignores);

        let copy_ignores = overrides
            .copy_ignores
            .clone()
            .or_else(|| WordList::non_empty(&file.copy_ignores))
            .unwrap_or(defaults.copy_ignores);

        let clean_source = overrides
            .clean_source
            .or(file.clean_py)
            .unwrap_or(defaults.clean_source);

        let python = overrides
            .python
            .clone()
            .or_else(|| file.python.clone().filter(|p| !p.trim().is_empty()))
            .unwrap_or(defaults.python);

        Self {
            paths,
            build_dir,
            ignores,
            copy_ignores,
            clean_source,
            python,
        }
    }
}
