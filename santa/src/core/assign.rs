//! Assignment engine: rejection sampling over random cyclic orderings.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::types::{Assignment, ForbiddenPairs, Participant};
use crate::error::SantaError;

/// Default cap on shuffle attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100_000;

/// Forbidden pairs resolved to participant indices.
///
/// Built once per assignment so each attempt only does index lookups.
#[derive(Debug, Clone)]
pub struct ConflictMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl ConflictMatrix {
    /// Resolve `forbidden` against `participants`. Names that match no
    /// participant are ignored.
    pub fn new(participants: &[Participant], forbidden: &ForbiddenPairs) -> Self {
        let size = participants.len();
        let mut cells = vec![false; size * size];
        for (i, a) in participants.iter().enumerate() {
            for (j, b) in participants.iter().enumerate().skip(i + 1) {
                if forbidden.contains(&a.name, &b.name) {
                    cells[i * size + j] = true;
                    cells[j * size + i] = true;
                }
            }
        }
        Self { size, cells }
    }

    pub fn conflicts(&self, a: usize, b: usize) -> bool {
        self.cells[a * self.size + b]
    }

    /// Number of other participants `idx` may be adjacent to.
    pub fn allowed_partners(&self, idx: usize) -> usize {
        (0..self.size)
            .filter(|&other| other != idx && !self.conflicts(idx, other))
            .count()
    }
}

/// True if no adjacent pair in `cycle`, including the wrap-around pair, is
/// forbidden.
pub fn is_compatible(cycle: &[usize], conflicts: &ConflictMatrix) -> bool {
    cycle
        .iter()
        .zip(cycle.iter().cycle().skip(1))
        .all(|(&a, &b)| !conflicts.conflicts(a, b))
}

/// Draw uniformly random orderings until one violates no forbidden pair.
///
/// Fails with [`SantaError::Unsatisfiable`] after `max_attempts` rejected
/// orderings. Callers are expected to run
/// [`validate_roster`](crate::core::roster::validate_roster) first so obviously
/// infeasible rosters never reach the sampling loop.
pub fn assign<R: Rng + ?Sized>(
    participants: &[Participant],
    forbidden: &ForbiddenPairs,
    max_attempts: u32,
    rng: &mut R,
) -> Result<Assignment, SantaError> {
    let conflicts = ConflictMatrix::new(participants, forbidden);
    let mut order: Vec<usize> = (0..participants.len()).collect();
    for attempt in 1..=max_attempts {
        order.shuffle(rng);
        if is_compatible(&order, &conflicts) {
            tracing::debug!(attempt, "found compatible ordering");
            return Ok(Assignment::from_cycle(order));
        }
    }
    Err(SantaError::Unsatisfiable {
        reason: format!("no compatible ordering found in {max_attempts} attempts"),
    })
}
