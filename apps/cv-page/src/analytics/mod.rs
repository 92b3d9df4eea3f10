// Local usage analytics: a bounded event log persisted under one storage key.
// Every collaborator reports through `EventLog::record`; nothing leaves the device
// except the explicit JSON export.

pub mod event_log;
pub mod export;
pub mod models;

pub use event_log::{EventLog, RecordOutcome};
pub use export::{DirectoryDownloads, DownloadSink, ExportReceipt};
pub use models::EventRecord;
