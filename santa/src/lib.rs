//! Secret Santa assignment and letter dispatch.
//!
//! Every participant gives to exactly one other participant, the givers form a
//! single cycle, and named pairs of people never give to each other. The crate
//! keeps a strict separation:
//!
//! - **[`core`]**: Pure logic (data model, roster checks, the assignment
//!   engine). No I/O; randomness is injected.
//! - **[`io`]**: Side-effecting collaborators (config file, letter templates,
//!   the mail record, SMTP delivery). Isolated behind small types and the
//!   [`io::mailer::Mailer`] trait so tests can swap them out.
//!
//! [`exchange`] coordinates both to implement the CLI.

pub mod core;
pub mod error;
pub mod exchange;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
