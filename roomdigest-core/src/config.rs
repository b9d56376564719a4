use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dirs::home_dir;
use log::debug;
use serde::Deserialize;

use crate::digest::DigestComposer;
use crate::error::{DigestError, Result};
use crate::footer::{DEFAULT_LOCALE, FooterTemplate};
use crate::link::RoomLinks;
use crate::render::MessageRenderer;
use crate::subject::{DEFAULT_APP_NAME, SubjectTemplates};
use crate::time::{DEFAULT_TIME_PATTERN, TimeFormatter, validate_time_pattern};

pub const CONFIG_ENV: &str = "ROOMDIGEST_CONFIG";
const CONFIG_DIR_NAME: &str = "roomdigest";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DigestConfig {
    pub locale: Option<String>,
    // Overrides the locale's built-in footer phrase; subjects still follow
    // `locale`.
    pub footer_pattern: Option<String>,
    pub time_pattern: Option<String>,
    // Fixed offset such as `+01:00`; unset means the host zone.
    pub utc_offset: Option<String>,
    pub web_client_base_url: Option<String>,
    pub app_name: Option<String>,
}

impl DigestConfig {
    pub fn from_env_or_home() -> Result<Self> {
        let path = config_path(
            env::var_os(CONFIG_ENV),
            env::var_os("XDG_CONFIG_HOME"),
            home_dir(),
        )?;
        Self::load_or_default(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| DigestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| DigestError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no config at {}; using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(DigestError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn footer_template(&self) -> Result<FooterTemplate> {
        match &self.footer_pattern {
            Some(pattern) => FooterTemplate::parse(pattern),
            None => FooterTemplate::for_locale(self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)),
        }
    }

    pub fn subject_templates(&self) -> Result<SubjectTemplates> {
        SubjectTemplates::for_locale(self.locale.as_deref().unwrap_or(DEFAULT_LOCALE))
    }

    pub fn app_name(&self) -> &str {
        self.app_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_APP_NAME)
    }

    pub fn time_pattern(&self) -> Result<&str> {
        let pattern = self.time_pattern.as_deref().unwrap_or(DEFAULT_TIME_PATTERN);
        validate_time_pattern(pattern)?;
        Ok(pattern)
    }

    pub fn links(&self) -> RoomLinks {
        RoomLinks {
            web_client_base_url: self.web_client_base_url.clone(),
            app_name: self.app_name.clone(),
        }
    }

    pub fn build_composer<F: TimeFormatter>(&self, formatter: F) -> Result<DigestComposer<F>> {
        let renderer = MessageRenderer::new(formatter).with_time_pattern(self.time_pattern()?);
        Ok(DigestComposer::new(renderer, self.footer_template()?)
            .with_subjects(self.subject_templates()?, self.app_name()))
    }
}

// Precedence:
// 1) ROOMDIGEST_CONFIG
// 2) XDG_CONFIG_HOME/roomdigest/config.json
// 3) ~/.config/roomdigest/config.json
fn config_path(
    explicit: Option<OsString>,
    xdg_config_home: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit.filter(|path| !path.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let config_root = match xdg_config_home.filter(|path| !path.is_empty()) {
        Some(path) => PathBuf::from(path),
        None => home
            .ok_or(DigestError::HomeDirectoryNotFound)?
            .join(".config"),
    };
    Ok(config_root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
