//! # Fixed Constants
//!
//! Thresholds and input limits compiled into the gradebook.

/// A discipline is promoted when its average grade is strictly greater than this.
///
/// An average of exactly `4.5` is *not* promoted.
pub const PROMOTE_THRESHOLD: f64 = 4.5;

/// First identifier handed out by a store, for students and grades alike.
pub const FIRST_ID: u64 = 1;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length in bytes for a first or last name.
pub const MAX_NAME_LENGTH: usize = 128;

/// Maximum length in bytes for a group label.
pub const MAX_GROUP_LENGTH: usize = 32;
