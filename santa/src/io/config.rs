//! Exchange configuration stored in `santa.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::assign::DEFAULT_MAX_ATTEMPTS;
use crate::core::types::{ForbiddenPairs, Participant};

/// Exchange configuration (TOML).
///
/// Loaded once at startup and passed explicitly to every component. Missing
/// fields default to sensible values; relative paths are resolved against the
/// config file's directory by [`load_config`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SantaConfig {
    /// File that receives every rendered letter. Truncated at run start.
    pub record_path: PathBuf,

    /// Shuffle attempts before the constraints are declared unsatisfiable.
    pub max_attempts: u32,

    /// Pairs of names that must never give to each other.
    pub forbidden: Vec<[String; 2]>,

    pub participants: Vec<Participant>,

    pub letter: LetterConfig,

    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LetterConfig {
    /// Subject line template.
    pub subject: String,
    /// Body template; the built-in letter is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Login name, also the sender address unless `from` is set.
    pub user: String,
    /// Sender mailbox, e.g. `Santa <santa@example.com>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub tls: TlsMode,
    /// Environment variable holding the SMTP password.
    pub password_env: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    #[default]
    Starttls,
    Tls,
    None,
}

impl Default for LetterConfig {
    fn default() -> Self {
        Self {
            subject: "Your Secret Santa assignment".to_string(),
            template_path: None,
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            user: String::new(),
            from: None,
            tls: TlsMode::default(),
            password_env: "SANTA_SMTP_PASSWORD".to_string(),
        }
    }
}

impl Default for SantaConfig {
    fn default() -> Self {
        Self {
            record_path: PathBuf::from("santa-record.txt"),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            forbidden: Vec::new(),
            participants: Vec::new(),
            letter: LetterConfig::default(),
            smtp: SmtpConfig::default(),
        }
    }
}

impl SmtpConfig {
    /// Login name, required wherever mail is addressed to the organizer.
    pub fn require_user(&self) -> Result<&str> {
        let user = self.user.trim();
        if user.is_empty() {
            return Err(anyhow!("smtp.user is required to send the test letter"));
        }
        Ok(user)
    }
}

impl SantaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(anyhow!("max_attempts must be > 0"));
        }
        if self.record_path.as_os_str().is_empty() {
            return Err(anyhow!("record_path must be set"));
        }
        if self.letter.subject.trim().is_empty() {
            return Err(anyhow!("letter.subject must be non-empty"));
        }
        if self.smtp.port == 0 {
            return Err(anyhow!("smtp.port must be > 0"));
        }
        Ok(())
    }

    pub fn forbidden_pairs(&self) -> ForbiddenPairs {
        ForbiddenPairs::new(
            self.forbidden
                .iter()
                .map(|[a, b]| (a.as_str(), b.as_str())),
        )
    }

    /// Sender address used for live mail and the test letter.
    pub fn sender(&self) -> &str {
        self.smtp.from.as_deref().unwrap_or(&self.smtp.user)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.record_path.is_relative() {
            self.record_path = base.join(&self.record_path);
        }
        self.letter.template_path = self.letter.template_path.take().map(|template| {
            if template.is_relative() {
                base.join(template)
            } else {
                template
            }
        });
    }
}

/// Load config from a TOML file.
///
/// Unlike most tools the file is mandatory: without it there is no roster.
pub fn load_config(path: &Path) -> Result<SantaConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut cfg: SantaConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    cfg.resolve_paths(base);
    Ok(cfg)
}
