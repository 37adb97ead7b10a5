//! Run orchestration for `santa`: validate, assign, then dispatch letters.

use std::io::Write;
use std::path::PathBuf;

use rand::Rng;
use tracing::{info, warn};

use crate::core::assign::assign;
use crate::core::roster::{unknown_names, validate_roster};
use crate::core::types::{Assignment, Participant, Pairing};
use crate::error::SantaError;
use crate::io::config::SantaConfig;
use crate::io::letter::LetterRenderer;
use crate::io::mailer::Mailer;
use crate::io::record::MailRecord;

/// Address the test letter names as its recipient.
pub const TEST_RECIPIENT_EMAIL: &str = "test@example.com";

/// Where rendered letters go after they are recorded.
#[derive(Clone, Copy)]
pub enum Delivery<'a> {
    /// Print `<giver> -> <recipient>` instead of sending.
    DryRun,
    /// Hand each letter to the mailer.
    Live(&'a dyn Mailer),
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub record_path: PathBuf,
    pub letters: usize,
}

/// Run a full exchange.
///
/// Order of effects: roster validation, record truncation, assignment (pure),
/// then one dispatch pass. A roster or template error leaves the record
/// untouched.
pub fn run_exchange<R, W>(
    config: &SantaConfig,
    delivery: Delivery<'_>,
    rng: &mut R,
    out: &mut W,
) -> Result<RunSummary, SantaError>
where
    R: Rng + ?Sized,
    W: Write,
{
    let participants = &config.participants;
    let forbidden = config.forbidden_pairs();
    for name in unknown_names(participants, &forbidden) {
        warn!(name, "forbidden pair names no participant");
    }
    validate_roster(participants, &forbidden)?;
    let renderer = LetterRenderer::from_config(&config.letter).map_err(SantaError::Config)?;

    let record = MailRecord::create(&config.record_path)?;
    info!(
        participants = participants.len(),
        forbidden = forbidden.len(),
        max_attempts = config.max_attempts,
        "assigning recipients"
    );
    let assignment = assign(participants, &forbidden, config.max_attempts, rng)?;

    let letters = dispatch(&assignment, participants, &renderer, &record, delivery, out)?;
    info!(letters, record = %record.path().display(), "run complete");
    Ok(RunSummary {
        record_path: record.path().to_path_buf(),
        letters,
    })
}

/// Render, record and deliver one letter per participant in list order.
///
/// Stops at the first failure; letters already recorded stay in the record.
pub fn dispatch<W: Write>(
    assignment: &Assignment,
    participants: &[Participant],
    renderer: &LetterRenderer,
    record: &MailRecord,
    delivery: Delivery<'_>,
    out: &mut W,
) -> Result<usize, SantaError> {
    let mut letters = 0;
    for pairing in assignment.pairings(participants) {
        let letter = renderer
            .render(pairing)
            .map_err(|source| SantaError::Render {
                name: pairing.giver.name.clone(),
                source,
            })?;
        record.append(&letter.record_text())?;

        match delivery {
            Delivery::DryRun => {
                writeln!(out, "{} -> {}", pairing.giver.name, pairing.recipient.name)
                    .map_err(SantaError::Output)?;
            }
            Delivery::Live(mailer) => {
                mailer
                    .send(&letter)
                    .map_err(|source| SantaError::Transport {
                        name: pairing.giver.name.clone(),
                        source,
                    })?;
            }
        }
        letters += 1;
    }
    Ok(letters)
}

/// Send a single letter to the configured SMTP user to check the setup.
///
/// Skips roster validation, assignment and the record.
pub fn send_test_letter(config: &SantaConfig, mailer: &dyn Mailer) -> Result<(), SantaError> {
    let organizer = config.smtp.require_user().map_err(SantaError::Config)?;
    let giver = Participant::new("Test Santa", organizer);
    let recipient = Participant::new("Test Recipient", TEST_RECIPIENT_EMAIL);
    let renderer = LetterRenderer::from_config(&config.letter).map_err(SantaError::Config)?;
    let letter = renderer
        .render(Pairing {
            giver: &giver,
            recipient: &recipient,
        })
        .map_err(|source| SantaError::Render {
            name: giver.name.clone(),
            source,
        })?;
    mailer
        .send(&letter)
        .map_err(|source| SantaError::Transport {
            name: giver.name.clone(),
            source,
        })?;
    info!(to = %giver.email, "test letter sent");
    Ok(())
}
