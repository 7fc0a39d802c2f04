// src/output/mod.rs
//! Export delivery, split into a pure planning step and an executing step.

mod clipboard;
mod paths;
mod plan;
mod types;
mod writer;

pub use clipboard::copy_to_clipboard;
pub use paths::{artifact_path, sanitize_filename};
pub use plan::plan_delivery;
pub use types::{
    ArtifactFormat, CompletedDelivery, DeliveryOptions, DeliveryPlan, DeliveryReport,
    DeliveryStats, DeliveryTarget, FailedDelivery,
};
pub use writer::{deliver, deliver_all};
