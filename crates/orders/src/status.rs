//! Status normalization
//!
//! The backend's status vocabulary is open-ended free text. This module
//! collapses it into a small closed set of lifecycle buckets without losing
//! the original label. Normalization is a total pure function: every input,
//! empty string included, yields a defined bucket and never panics.

/// Closed set of lifecycle categories the UI renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    Pending,
    Delivered,
    InUse,
    Completed,
}

impl StatusBucket {
    pub fn display(&self) -> &'static str {
        match self {
            StatusBucket::Pending => "Pending",
            StatusBucket::Delivered => "Delivered",
            StatusBucket::InUse => "In Use",
            StatusBucket::Completed => "Completed",
        }
    }
}

/// A normalized status: the bucket, a display label preserving the raw
/// wording, and whether any follow-up action remains available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedStatus {
    pub bucket: StatusBucket,
    pub label: String,
    pub actionable: bool,
}

/// Maps a raw backend status onto its bucket.
///
/// Synonyms are matched on the uppercase-normalized value; `AWAITING_*` and
/// `PENDING_*` prefixes (KYC holds, payment holds) all land in `Pending`.
/// Cancellations are terminal and land in `Completed` with no further action
/// available. Unrecognized values fall back to `Pending` with no actionable
/// follow-up, keeping the raw label (title-cased) for display.
pub fn normalize_status(raw: &str) -> NormalizedStatus {
    let upper = raw.trim().to_ascii_uppercase();

    let (bucket, actionable) = match upper.as_str() {
        "PENDING" | "PROCESSING" | "CONFIRMED" => (StatusBucket::Pending, true),
        "DELIVERED" | "SHIPPED" | "OUT_FOR_DELIVERY" => (StatusBucket::Delivered, true),
        "IN_USE" | "ACTIVE" | "IN_PROGRESS" | "EXTENSION_REQUESTED" => (StatusBucket::InUse, true),
        "RETURN_CONFIRMED" | "SETTLEMENT_PENDING" => (StatusBucket::Completed, true),
        "COMPLETED" | "RETURNED" | "CLOSED" | "FINISHED" => (StatusBucket::Completed, false),
        "CANCELLED" | "CANCELED" => (StatusBucket::Completed, false),
        other if other.starts_with("AWAITING_") || other.starts_with("PENDING_") => {
            (StatusBucket::Pending, true)
        }
        _ => (StatusBucket::Pending, false),
    };

    let label = if upper.is_empty() {
        bucket.display().to_string()
    } else {
        title_case(&upper)
    };

    NormalizedStatus {
        bucket,
        label,
        actionable,
    }
}

/// Whether a raw status gates the order on identity verification.
pub fn requires_kyc(raw: &str) -> bool {
    raw.trim().to_ascii_uppercase() == "PENDING_KYC"
}

fn title_case(upper: &str) -> String {
    upper
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_string() + chars.as_str().to_ascii_lowercase().as_str()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
