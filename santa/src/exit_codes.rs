//! Stable exit codes for the santa CLI.
//!
//! Each [`SantaError`](crate::error::SantaError) kind maps to exactly one
//! code so calling scripts can branch on the failure type.

/// Run finished (letters recorded, and sent when `--official`).
pub const OK: i32 = 0;
/// Config file missing, unparsable, or semantically invalid.
pub const INVALID_CONFIG: i32 = 1;
/// Reserved: clap exits with this on usage errors.
pub const USAGE: i32 = 2;
/// Roster rejected: bad address, duplicate name, or too few participants.
pub const INVALID_ROSTER: i32 = 3;
/// No cyclic ordering satisfies the forbidden pairs.
pub const UNSATISFIABLE: i32 = 4;
/// Mail record could not be written, or output could not be printed.
pub const RECORD: i32 = 5;
/// A letter could not be rendered or handed to the transport.
pub const DELIVERY: i32 = 6;
