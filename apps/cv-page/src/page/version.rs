use tracing::warn;

use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    FirstVisit,
    Unchanged,
    Updated { previous: String },
}

/// Compares the last-seen CV version with `current`, then stores `current`.
/// Storage failures read as a first visit and skip the write.
pub fn check_cv_version<S>(store: &mut S, key: &str, current: &str) -> VersionCheck
where
    S: KeyValueStore + ?Sized,
{
    let previous = store.get(key).unwrap_or_else(|e| {
        warn!("Cannot read last CV version: {e}");
        None
    });

    if let Err(e) = store.set(key, current) {
        warn!("Cannot store CV version: {e}");
    }

    match previous {
        None => VersionCheck::FirstVisit,
        Some(prev) if prev == current => VersionCheck::Unchanged,
        Some(prev) => VersionCheck::Updated { previous: prev },
    }
}
