use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::analytics::event_log::EventLog;
use crate::analytics::models::EventRecord;
use crate::errors::AppError;
use crate::storage::KeyValueStore;

pub const EXPORT_FILENAME: &str = "cv-analytics.json";
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// Somewhere an offered file ends up, e.g. the user's download directory.
pub trait DownloadSink {
    /// Delivers `body` under `filename` and returns a human-readable location.
    fn offer(&mut self, filename: &str, content_type: &str, body: &[u8]) -> Result<String, AppError>;
}

/// Writes downloads into a directory, replacing any previous file of the same name.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectoryDownloads { dir: dir.into() }
    }
}

impl DownloadSink for DirectoryDownloads {
    fn offer(&mut self, filename: &str, _content_type: &str, body: &[u8]) -> Result<String, AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Export(format!("cannot create {}: {e}", self.dir.display()))
        })?;
        let target = self.dir.join(filename);
        fs::write(&target, body)
            .map_err(|e| AppError::Export(format!("cannot write {}: {e}", target.display())))?;
        Ok(target.display().to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ExportReceipt {
    pub location: String,
    pub exported: usize,
}

/// Pretty-printed JSON array of the records, two-space indented.
pub fn render_export(events: &[EventRecord]) -> Result<String, AppError> {
    serde_json::to_string_pretty(events)
        .map_err(|e| AppError::Export(format!("cannot serialize analytics: {e}")))
}

impl EventLog {
    /// Offers the current log as `cv-analytics.json`, then records the export itself.
    /// The exported file never contains its own export event.
    pub fn export_as_json<S, D>(&self, store: &mut S, sink: &mut D) -> Result<ExportReceipt, AppError>
    where
        S: KeyValueStore + ?Sized,
        D: DownloadSink + ?Sized,
    {
        let events = self.read_all(&*store);
        let body = render_export(&events)?;
        let location = sink.offer(EXPORT_FILENAME, EXPORT_CONTENT_TYPE, body.as_bytes())?;
        info!("Exported {} analytics events to {location}", events.len());

        self.record(store, "analytics", "export", Some("json"));

        Ok(ExportReceipt {
            location,
            exported: events.len(),
        })
    }
}
