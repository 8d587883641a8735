//! Write-time timestamp policy.
//!
//! Timestamps are always assigned by the store at the moment of the write,
//! never accepted from callers.

use chrono::{DateTime, Duration, Utc};

/// The stamp to record for a modification happening at `now`, given the
/// stamp recorded by the previous modification (if any).
///
/// Successive stamps on the same row are strictly increasing even when the
/// clock has not advanced (or has stepped backwards) between writes.
pub fn next_stamp(
  previous: Option<DateTime<Utc>>,
  now: DateTime<Utc>,
) -> DateTime<Utc> {
  match previous {
    Some(prev) if now <= prev => prev + Duration::microseconds(1),
    _ => now,
  }
}
