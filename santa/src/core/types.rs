//! Data model shared by the assignment engine and the dispatcher.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// A person taking part in the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Unordered set of unordered name pairs that must never be adjacent in the
/// cycle.
///
/// Each pair is stored under both names, so lookup is symmetric and borrows
/// its keys. A pair naming the same person twice is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenPairs {
    partners: HashMap<String, HashSet<String>>,
    len: usize,
}

impl ForbiddenPairs {
    pub fn new<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut set = Self::default();
        for (a, b) in pairs {
            set.insert(a, b);
        }
        set
    }

    /// Insert a pair; returns false if it was already present or degenerate.
    pub fn insert(&mut self, a: impl Into<String>, b: impl Into<String>) -> bool {
        let (a, b) = (a.into(), b.into());
        if a == b || self.contains(&a, &b) {
            return false;
        }
        self.partners
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        self.partners.entry(b).or_default().insert(a);
        self.len += 1;
        true
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.partners
            .get(a)
            .is_some_and(|partners| partners.contains(b))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate pairs in unspecified order, smaller name first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.partners.iter().flat_map(|(a, partners)| {
            partners
                .iter()
                .filter(move |b| a < *b)
                .map(move |b| (a.as_str(), b.as_str()))
        })
    }
}

/// Accepted cycle and the recipient it induces for every participant.
///
/// Indices refer to positions in the participant list the assignment was built
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    cycle: Vec<usize>,
    recipients: Vec<usize>,
}

impl Assignment {
    /// Derive recipients from a cyclic ordering: position `i` gives to
    /// position `i + 1`, the last position gives to the first.
    ///
    /// `cycle` must be a permutation of `0..cycle.len()`.
    pub fn from_cycle(cycle: Vec<usize>) -> Self {
        let mut recipients = vec![0; cycle.len()];
        for (pos, &giver) in cycle.iter().enumerate() {
            recipients[giver] = cycle[(pos + 1) % cycle.len()];
        }
        Self { cycle, recipients }
    }

    pub fn cycle(&self) -> &[usize] {
        &self.cycle
    }

    pub fn recipient_of(&self, giver: usize) -> usize {
        self.recipients[giver]
    }

    /// Giver/recipient pairs in participant list order (not cycle order).
    pub fn pairings<'a>(
        &'a self,
        participants: &'a [Participant],
    ) -> impl Iterator<Item = Pairing<'a>> + 'a {
        participants
            .iter()
            .enumerate()
            .map(move |(idx, giver)| Pairing {
                giver,
                recipient: &participants[self.recipients[idx]],
            })
    }
}

/// One giver and the participant they buy a gift for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing<'a> {
    pub giver: &'a Participant,
    pub recipient: &'a Participant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::participants;

    #[test]
    fn forbidden_pairs_are_symmetric() {
        let pairs = ForbiddenPairs::new([("Bob", "Alice")]);
        assert!(pairs.contains("Alice", "Bob"));
        assert!(pairs.contains("Bob", "Alice"));
        assert!(!pairs.contains("Alice", "Carol"));
    }

    #[test]
    fn forbidden_pairs_dedupe_reversed_and_drop_self_pairs() {
        let mut pairs = ForbiddenPairs::new([("Alice", "Bob"), ("Bob", "Alice")]);
        assert_eq!(pairs.len(), 1);
        assert!(!pairs.insert("Carol", "Carol"));
        assert_eq!(pairs.len(), 1);
        assert!(pairs.insert("Carol", "Alice"));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn empty_set_forbids_nothing() {
        let pairs = ForbiddenPairs::default();
        assert!(pairs.is_empty());
        assert!(!pairs.contains("Alice", "Bob"));
        assert_eq!(pairs.iter().count(), 0);
    }

    #[test]
    fn iter_yields_each_pair_once_smaller_name_first() {
        let pairs = ForbiddenPairs::new([("Bob", "Alice"), ("Dan", "Carol")]);
        let mut listed: Vec<(&str, &str)> = pairs.iter().collect();
        listed.sort_unstable();
        assert_eq!(listed, vec![("Alice", "Bob"), ("Carol", "Dan")]);
    }

    #[test]
    fn recipients_follow_cycle_and_wrap_around() {
        let assignment = Assignment::from_cycle(vec![2, 0, 1]);
        assert_eq!(assignment.recipient_of(2), 0);
        assert_eq!(assignment.recipient_of(0), 1);
        assert_eq!(assignment.recipient_of(1), 2);
    }

    #[test]
    fn pairings_follow_participant_order() {
        let people = participants(&["A", "B", "C"]);
        let assignment = Assignment::from_cycle(vec![1, 0, 2]);
        let lines: Vec<String> = assignment
            .pairings(&people)
            .map(|p| format!("{} -> {}", p.giver.name, p.recipient.name))
            .collect();
        assert_eq!(lines, vec!["A -> C", "B -> A", "C -> B"]);
    }
}
