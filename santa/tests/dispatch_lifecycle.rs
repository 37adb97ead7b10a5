//! End-to-end runs through the library with scripted mailers.

use santa::core::assign::DEFAULT_MAX_ATTEMPTS;
use santa::core::types::Assignment;
use santa::error::SantaError;
use santa::exchange::{Delivery, run_exchange};
use santa::io::record::separator;
use santa::test_support::{RecordingMailer, TestExchange, seeded_rng};

fn recipient_of<'a>(lines: &'a [String], giver: &str) -> &'a str {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(&format!("{giver} -> ")))
        .expect("giver line")
}

#[test]
fn couples_never_draw_each_other() {
    let mut exchange =
        TestExchange::new(&["Ann", "Ben", "Cat", "Dan", "Eve", "Fay"]).expect("exchange");
    exchange.forbid("Ann", "Ben");
    exchange.forbid("Cat", "Dan");
    exchange.forbid("Eve", "Fay");

    for seed in 0..40 {
        let mut out = Vec::new();
        run_exchange(
            exchange.config(),
            Delivery::DryRun,
            &mut seeded_rng(seed),
            &mut out,
        )
        .expect("run");
        let lines: Vec<String> = String::from_utf8(out)
            .expect("utf8")
            .lines()
            .map(str::to_string)
            .collect();

        for (a, b) in [("Ann", "Ben"), ("Cat", "Dan"), ("Eve", "Fay")] {
            assert_ne!(recipient_of(&lines, a), b, "seed {seed}");
            assert_ne!(recipient_of(&lines, b), a, "seed {seed}");
        }
    }
}

#[test]
fn transport_failure_keeps_earlier_record_entries() {
    let exchange = TestExchange::new(&["A", "B", "C", "D"]).expect("exchange");
    let mailer = RecordingMailer::failing_on(2);

    let err = run_exchange(
        exchange.config(),
        Delivery::Live(&mailer),
        &mut seeded_rng(9),
        &mut std::io::sink(),
    )
    .expect_err("second send fails");

    match &err {
        SantaError::Transport { name, .. } => assert_eq!(name, "B"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(mailer.sent().len(), 1);
    let record = exchange.read_record().expect("record");
    assert_eq!(record.lines().filter(|l| *l == separator()).count(), 2);
}

#[test]
fn three_participants_with_forbidden_pair_are_rejected_before_recording() {
    let mut exchange = TestExchange::new(&["A", "B", "C"]).expect("exchange");
    exchange.forbid("A", "B");

    let err = run_exchange(
        exchange.config(),
        Delivery::DryRun,
        &mut seeded_rng(4),
        &mut std::io::sink(),
    )
    .expect_err("unsatisfiable");

    assert!(matches!(err, SantaError::Unsatisfiable { .. }));
    assert!(!exchange.config().record_path.exists());
}

#[test]
fn attempt_bound_is_taken_from_config() {
    // Six people where P0 may only sit between P1 and P5: feasible, but rare
    // enough that a single attempt almost never finds it.
    let names = ["P0", "P1", "P2", "P3", "P4", "P5"];
    let mut exchange = TestExchange::new(&names).expect("exchange");
    for other in ["P2", "P3", "P4"] {
        exchange.forbid("P0", other);
    }
    exchange.config_mut().max_attempts = DEFAULT_MAX_ATTEMPTS;
    run_exchange(
        exchange.config(),
        Delivery::DryRun,
        &mut seeded_rng(21),
        &mut std::io::sink(),
    )
    .expect("default bound finds an ordering");

    let unlucky = (0..200).find(|&seed| {
        let mut rng = seeded_rng(seed);
        let mut order: Vec<usize> = (0..names.len()).collect();
        rand::seq::SliceRandom::shuffle(order.as_mut_slice(), &mut rng);
        let assignment = Assignment::from_cycle(order);
        let to = assignment.recipient_of(0);
        let from = (0..names.len())
            .find(|&g| assignment.recipient_of(g) == 0)
            .expect("giver to P0");
        !([to, from] == [1, 5] || [to, from] == [5, 1])
    });
    let seed = unlucky.expect("some seed misses on the first shuffle");
    exchange.config_mut().max_attempts = 1;
    let err = run_exchange(
        exchange.config(),
        Delivery::DryRun,
        &mut seeded_rng(seed),
        &mut std::io::sink(),
    )
    .expect_err("one attempt is not enough");
    assert!(matches!(err, SantaError::Unsatisfiable { .. }));
}
