//! The expiry cutoff rule shared by every identifier source

use std::time::{Duration, SystemTime};

/// Point in time before which a resource counts as expired.
///
/// A resource is expired when its creation or modification timestamp is
/// strictly before `now - horizon`. An oversized horizon saturates at the
/// Unix epoch rather than underflowing.
///
/// # Examples
///
/// ```
/// use custodian_domain::expiry_cutoff;
/// use std::time::{Duration, SystemTime};
///
/// let cutoff = expiry_cutoff(Duration::from_secs(3600));
/// assert!(cutoff < SystemTime::now());
/// ```
pub fn expiry_cutoff(horizon: Duration) -> SystemTime {
    SystemTime::now()
        .checked_sub(horizon)
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
