// src/export/mod.rs
//! Export workflow: plans and quota, caller identity, persistence, and
//! the orchestrator tying fetch, render and enrichment together.

mod identity;
mod orchestrator;
mod plans;
mod store;
mod types;

pub use identity::{Authenticator, StaticAuthenticator};
pub use orchestrator::{extract_page_id, CompletedExport, ExportOrchestrator};
pub use plans::{month_start, Plan};
pub use store::{ExportStore, FileExportStore, MemoryExportStore};
pub use types::{Caller, Export, ExportReceipt, ExportRequest, ExportStatus};
