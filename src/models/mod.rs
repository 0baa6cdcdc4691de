//! Data models for the snapshot pipeline
//!
//! Everything here is built fresh on each scheduled run and dropped once the
//! workbook is written.

pub mod asset;
pub mod summary;
pub mod job;

pub use asset::{AssetRow, AssetTable};
pub use summary::AnalysisSummary;
pub use job::JobOutcome;
