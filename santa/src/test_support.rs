//! Test-only helpers for building rosters, configs and mailers.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use crate::core::types::Participant;
use crate::io::config::SantaConfig;
use crate::io::letter::Letter;
use crate::io::mailer::Mailer;

/// Create a participant with a deterministic `<lowercase name>@example.com`
/// address.
pub fn participant(name: &str) -> Participant {
    Participant::new(name, format!("{}@example.com", name.to_lowercase()))
}

pub fn participants(names: &[&str]) -> Vec<Participant> {
    names.iter().map(|name| participant(name)).collect()
}

/// Reproducible RNG for assignment tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Mailer that records every letter instead of sending it.
///
/// With `fail_on` set, the n-th send (1-based) returns an error and nothing
/// after it is recorded.
#[derive(Default)]
pub struct RecordingMailer {
    sent: RefCell<Vec<Letter>>,
    calls: Cell<usize>,
    fail_on: Option<usize>,
}

impl RecordingMailer {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Letter> {
        self.sent.borrow().clone()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, letter: &Letter) -> Result<()> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if self.fail_on == Some(call) {
            return Err(anyhow!("connection refused"));
        }
        self.sent.borrow_mut().push(letter.clone());
        Ok(())
    }
}

/// A temporary directory holding an exchange config and its record file.
pub struct TestExchange {
    temp: TempDir,
    config: SantaConfig,
}

impl TestExchange {
    /// Config with the given participants, no forbidden pairs and a record
    /// path inside the temp dir. Nothing is written to disk yet.
    pub fn new(names: &[&str]) -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let config = SantaConfig {
            record_path: temp.path().join("record.txt"),
            participants: participants(names),
            ..SantaConfig::default()
        };
        Ok(Self { temp, config })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn config(&self) -> &SantaConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SantaConfig {
        &mut self.config
    }

    pub fn forbid(&mut self, a: &str, b: &str) {
        self.config.forbidden.push([a.to_string(), b.to_string()]);
    }

    /// Write `santa.toml` with a record path relative to the temp dir.
    pub fn write_config(&self) -> Result<PathBuf> {
        let mut on_disk = self.config.clone();
        on_disk.record_path = PathBuf::from("record.txt");
        let path = self.root().join("santa.toml");
        let contents = toml::to_string_pretty(&on_disk).context("serialize config")?;
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn read_record(&self) -> Result<String> {
        let path = &self.config.record_path;
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
    }
}
