//! I/O helpers for santa runs: config, letters, the mail record and delivery.

pub mod config;
pub mod letter;
pub mod mailer;
pub mod record;
