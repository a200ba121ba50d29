//! SeaORM models for the daily report schema.

pub mod comment;
pub mod customer;
pub mod daily_report;
pub mod sales;
pub mod visit_record;

pub use daily_report::ReportStatus;
