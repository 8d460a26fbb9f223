/// Pipeline pacing and validation constants

/// Smallest value accepted as a real student number; anything below this
/// is a header, a summary row or noise.
pub const MIN_STUDENT_NUMBER: i64 = 10_000;

/// Pause after writing each PDF so filesystem writes never overlap
pub const RENDER_PAUSE_MS: u64 = 100;

/// Pause after each outbound email to stay inside provider rate limits
pub const DELIVER_PAUSE_MS: u64 = 5_000;
