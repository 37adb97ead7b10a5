//! Letter rendering for each giver.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::core::types::{Pairing, Participant};
use crate::io::config::LetterConfig;

const DEFAULT_LETTER_TEMPLATE: &str = include_str!("templates/letter.txt");

/// A rendered notification, addressed to the giver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    pub to_name: String,
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

impl Letter {
    /// Text appended to the mail record for this letter.
    pub fn record_text(&self) -> String {
        format!(
            "To: {} <{}>\nSubject: {}\n\n{}\n",
            self.to_name,
            self.to_email,
            self.subject,
            self.body.trim_end()
        )
    }
}

#[derive(Debug, Serialize)]
struct PersonContext<'a> {
    name: &'a str,
    email: &'a str,
}

impl<'a> From<&'a Participant> for PersonContext<'a> {
    fn from(participant: &'a Participant) -> Self {
        Self {
            name: &participant.name,
            email: &participant.email,
        }
    }
}

/// Template engine wrapper around minijinja.
///
/// Both templates are compiled up front so a broken template is reported
/// before the record is truncated.
pub struct LetterRenderer {
    env: Environment<'static>,
}

impl LetterRenderer {
    pub fn new(subject: &str, body: &str) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template_owned("subject", subject.to_string())
            .context("compile subject template")?;
        env.add_template_owned("letter", body.to_string())
            .context("compile letter template")?;
        Ok(Self { env })
    }

    /// Build a renderer from config, reading the body template from disk when
    /// `template_path` is set.
    pub fn from_config(config: &LetterConfig) -> Result<Self> {
        match &config.template_path {
            Some(path) => Self::new(&config.subject, &read_template(path)?),
            None => Self::new(&config.subject, DEFAULT_LETTER_TEMPLATE),
        }
    }

    pub fn render(&self, pairing: Pairing<'_>) -> Result<Letter> {
        let ctx = context! {
            santa => PersonContext::from(pairing.giver),
            recipient => PersonContext::from(pairing.recipient),
        };
        let subject = self
            .env
            .get_template("subject")?
            .render(&ctx)
            .context("render subject")?;
        let body = self
            .env
            .get_template("letter")?
            .render(&ctx)
            .context("render letter body")?;
        Ok(Letter {
            to_name: pairing.giver.name.clone(),
            to_email: pairing.giver.email.clone(),
            subject: subject.trim().to_string(),
            body,
        })
    }
}

fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read letter template {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::participant;

    #[test]
    fn default_letter_names_recipient() {
        let renderer = LetterRenderer::from_config(&LetterConfig::default()).expect("renderer");
        let (giver, recipient) = (participant("Alice"), participant("Bob"));
        let letter = renderer
            .render(Pairing {
                giver: &giver,
                recipient: &recipient,
            })
            .expect("render");

        assert_eq!(letter.to_email, giver.email);
        assert_eq!(letter.subject, "Your Secret Santa assignment");
        assert!(letter.body.contains("Alice"));
        assert!(letter.body.contains("Secret Santa for Bob"));
    }

    #[test]
    fn record_text_has_headers_and_trailing_newline() {
        let letter = Letter {
            to_name: "Alice".to_string(),
            to_email: "alice@example.com".to_string(),
            subject: "Hi".to_string(),
            body: "Body\n\n".to_string(),
        };
        assert_eq!(
            letter.record_text(),
            "To: Alice <alice@example.com>\nSubject: Hi\n\nBody\n"
        );
    }

    #[test]
    fn custom_template_is_loaded_from_disk() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("letter.txt");
        fs::write(&path, "{{ santa.name }} buys for {{ recipient.email }}").expect("write");
        let config = LetterConfig {
            subject: "For {{ santa.name }}".to_string(),
            template_path: Some(path),
        };
        let renderer = LetterRenderer::from_config(&config).expect("renderer");
        let (giver, recipient) = (participant("Alice"), participant("Bob"));
        let letter = renderer
            .render(Pairing {
                giver: &giver,
                recipient: &recipient,
            })
            .expect("render");
        assert_eq!(letter.subject, "For Alice");
        assert_eq!(letter.body, format!("Alice buys for {}", recipient.email));
    }

    #[test]
    fn broken_template_fails_at_construction() {
        assert!(LetterRenderer::new("ok", "{% if %}").is_err());
    }
}
