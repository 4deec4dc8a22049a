//! Batch reclaim of previously stored variant files.
//!
//! Reclaim runs when the owning record is updated or deleted: the caller
//! extracts the old paths from its record and hands them here. It never
//! fails the caller's flow; a dangling file is preferable to refusing a
//! legitimate business update.

use crate::traits::MediaStore;

/// Outcome for one path in a reclaim batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReclaimOutcome {
    Deleted,
    AlreadyAbsent,
    Failed(String),
}

/// Per-path results of one reclaim call.
#[derive(Debug, Clone, Default)]
pub struct ReclaimReport {
    pub outcomes: Vec<(String, ReclaimOutcome)>,
}

impl ReclaimReport {
    pub fn deleted(&self) -> usize {
        self.count(|o| matches!(o, ReclaimOutcome::Deleted))
    }

    pub fn already_absent(&self) -> usize {
        self.count(|o| matches!(o, ReclaimOutcome::AlreadyAbsent))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ReclaimOutcome::Failed(_)))
    }

    /// True when no path in the batch failed.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&ReclaimOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Delete every path in the batch, tolerating already-missing files.
///
/// Reclaim is idempotent: a second call on the same paths reports
/// `AlreadyAbsent` instead of an error. A failure on one path (permission
/// error, traversal rejection) is recorded and logged, and does not stop
/// deletion of the remaining paths.
pub async fn reclaim(store: &dyn MediaStore, paths: &[String]) -> ReclaimReport {
    let mut report = ReclaimReport::default();

    for path in paths {
        let outcome = match store.remove(path).await {
            Ok(true) => ReclaimOutcome::Deleted,
            Ok(false) => ReclaimOutcome::AlreadyAbsent,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to reclaim stored file");
                ReclaimOutcome::Failed(e.to_string())
            }
        };
        report.outcomes.push((path.clone(), outcome));
    }

    report
}
