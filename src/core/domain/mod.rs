//! Domain types.

mod payload;
mod report;

pub use payload::SecretPayload;
pub use report::CheckReport;
