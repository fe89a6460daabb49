//! CLI exit code registry.
//!
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | Usage error (bad arguments)                    |
//! | 3    | Invalid config (TOML parse/validation failure) |
//! | 4    | Runtime error (unreadable input, bad schema)   |

/// Success - reconciliation completed and tables were written.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap emits this itself on argument parse failure.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Runtime failure: unreadable input file, missing column, write error.
pub const EXIT_RUNTIME: u8 = 4;
