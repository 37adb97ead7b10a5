//! Roster checks that run before any record is touched.

use std::collections::HashSet;

use crate::core::address::is_valid_address;
use crate::core::assign::ConflictMatrix;
use crate::core::types::{ForbiddenPairs, Participant};
use crate::error::SantaError;

/// Reject rosters that cannot produce a valid exchange:
/// - fewer than two participants
/// - duplicate names
/// - malformed contact addresses (first offender in list order)
/// - a participant left without enough allowed neighbours to sit in a cycle
pub fn validate_roster(
    participants: &[Participant],
    forbidden: &ForbiddenPairs,
) -> Result<(), SantaError> {
    if participants.len() < 2 {
        return Err(SantaError::TooFewParticipants {
            count: participants.len(),
        });
    }

    let mut seen = HashSet::new();
    for participant in participants {
        if !seen.insert(participant.name.as_str()) {
            return Err(SantaError::DuplicateName {
                name: participant.name.clone(),
            });
        }
    }

    for participant in participants {
        if !is_valid_address(&participant.email) {
            return Err(SantaError::InvalidAddress {
                name: participant.name.clone(),
                address: participant.email.clone(),
            });
        }
    }

    check_feasible(participants, forbidden)
}

/// Every participant needs two distinct allowed neighbours in a cycle of three
/// or more, and the single other participant in a cycle of two.
fn check_feasible(
    participants: &[Participant],
    forbidden: &ForbiddenPairs,
) -> Result<(), SantaError> {
    let needed = if participants.len() == 2 { 1 } else { 2 };
    let conflicts = ConflictMatrix::new(participants, forbidden);
    for (idx, participant) in participants.iter().enumerate() {
        let allowed = conflicts.allowed_partners(idx);
        if allowed < needed {
            return Err(SantaError::Unsatisfiable {
                reason: format!(
                    "{} may only be paired with {allowed} other participant(s) but needs {needed}",
                    participant.name
                ),
            });
        }
    }
    Ok(())
}

/// Names mentioned in forbidden pairs that match no participant, sorted.
pub fn unknown_names<'a>(
    participants: &[Participant],
    forbidden: &'a ForbiddenPairs,
) -> Vec<&'a str> {
    let known: HashSet<&str> = participants.iter().map(|p| p.name.as_str()).collect();
    let mut unknown: Vec<&str> = forbidden
        .iter()
        .flat_map(|(a, b)| [a, b])
        .filter(|name| !known.contains(name))
        .collect();
    unknown.sort_unstable();
    unknown.dedup();
    unknown
}
