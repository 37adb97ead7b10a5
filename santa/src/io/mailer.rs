//! Mail transport abstraction.
//!
//! The [`Mailer`] trait decouples dispatch from the actual SMTP backend. Tests
//! use recording mailers that capture letters without opening connections.

use std::env;

use anyhow::{Context, Result, anyhow};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, info, instrument};

use crate::io::config::{SmtpConfig, TlsMode};
use crate::io::letter::Letter;

/// Abstraction over letter delivery backends.
pub trait Mailer {
    /// Deliver `letter` to its addressee.
    fn send(&self, letter: &Letter) -> Result<()>;
}

/// Mailer that relays through an SMTP server via lettre.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a transport from `[smtp]` config.
    ///
    /// The password is read from the environment variable named by
    /// `password_env`; when it is unset the connection is made without
    /// authentication.
    pub fn from_config(config: &SmtpConfig, sender: &str) -> Result<Self> {
        let from: Mailbox = sender
            .parse()
            .with_context(|| format!("parse sender mailbox '{sender}'"))?;

        let builder = match config.tls {
            TlsMode::Starttls => SmtpTransport::starttls_relay(&config.host)
                .with_context(|| format!("configure starttls relay {}", config.host))?,
            TlsMode::Tls => SmtpTransport::relay(&config.host)
                .with_context(|| format!("configure tls relay {}", config.host))?,
            TlsMode::None => SmtpTransport::builder_dangerous(&config.host),
        };
        let mut builder = builder.port(config.port);

        match env::var(&config.password_env) {
            Ok(password) => {
                if config.user.is_empty() {
                    return Err(anyhow!(
                        "{} is set but smtp.user is empty",
                        config.password_env
                    ));
                }
                builder = builder.credentials(Credentials::new(config.user.clone(), password));
            }
            Err(_) => debug!(
                password_env = %config.password_env,
                "no smtp password in environment, sending unauthenticated"
            ),
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

impl Mailer for SmtpMailer {
    #[instrument(skip_all, fields(to = %letter.to_email))]
    fn send(&self, letter: &Letter) -> Result<()> {
        let message = build_message(&self.from, letter)?;
        self.transport.send(&message).context("smtp send")?;
        info!("letter sent");
        Ok(())
    }
}

fn build_message(from: &Mailbox, letter: &Letter) -> Result<Message> {
    let to = Mailbox::new(
        Some(letter.to_name.clone()),
        letter
            .to_email
            .parse()
            .with_context(|| format!("parse recipient address '{}'", letter.to_email))?,
    );
    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(letter.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(letter.body.clone())
        .context("build message")
}
