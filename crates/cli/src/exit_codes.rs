//! CLI Exit Code Registry
//!
//! Single source of truth for `ideamerge` exit codes. Scripts that chain the
//! merge into the persistence step rely on them.
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (bad args, missing file) |
//! | 10-19   | merge     | Reconciliation run codes                 |
//! | 20-29   | extract   | Transcript extraction codes              |

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable input file.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Merge (10-19)
// =============================================================================

/// Config file failed to parse or validate.
pub const EXIT_MERGE_INVALID_CONFIG: u8 = 10;

/// An input collection could not be decoded.
pub const EXIT_MERGE_INPUT: u8 = 11;

/// Summaries were supplied but none of them matched a detail.
pub const EXIT_MERGE_NO_MATCHES: u8 = 12;

/// Output could not be written.
pub const EXIT_MERGE_OUTPUT: u8 = 13;

// =============================================================================
// Extract (20-29)
// =============================================================================

/// Transcript is not a JSON array of events.
pub const EXIT_EXTRACT_PARSE: u8 = 20;

/// No scrape results or no detailing response found in the transcript.
pub const EXIT_EXTRACT_NOT_FOUND: u8 = 21;
