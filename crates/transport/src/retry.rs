//! Transport-candidate retry policy
//!
//! The backend may be reachable only over one of `http://` or `https://`
//! depending on environment, and guessing wrong must not be fatal. Instead of
//! rewriting the URL at each failure, the full ordered candidate list is
//! computed up front and tried under a shared attempt budget: the original
//! URL first, then (for an `http://` URL) its `https://` rewrite. Retry is
//! strictly scheme-swap; the same scheme is never attempted twice, and
//! exhausting the budget propagates the first transport error observed.

/// Attempt budget for one logical call.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Maximum network attempts per logical call.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 2 }
    }
}

/// Computes the ordered transport candidates for a URL.
///
/// `http://` yields `[original, https rewrite]`; any other scheme yields the
/// original alone. The list is capped by `max_attempts` (floored at one so a
/// call always gets its first attempt).
pub fn transport_candidates(url: &str, max_attempts: u32) -> Vec<String> {
    let mut candidates = vec![url.to_string()];
    if let Some(rest) = url.strip_prefix("http://") {
        candidates.push(format!("https://{}", rest));
    }
    candidates.truncate(max_attempts.max(1) as usize);
    candidates
}
