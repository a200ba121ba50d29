use entity::ReportStatus;
use sea_orm::{ActiveEnum, DbErr};
use thiserror::Error;

pub type ReportsResult<T> = Result<T, ReportsError>;

#[derive(Debug, Error)]
pub enum ReportsError {
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
    #[error("sales {0} not found")]
    SalesNotFound(i32),
    #[error("manager {0} not found")]
    ManagerNotFound(i32),
    #[error("customer {0} not found")]
    CustomerNotFound(i32),
    #[error("daily report {0} not found")]
    ReportNotFound(i32),
    #[error("manager {manager_id} for sales {sales_id} would close a cycle")]
    ManagerCycle { sales_id: i32, manager_id: i32 },
    #[error("report {report_id} cannot move from {} to {}", .from.to_value(), .to.to_value())]
    InvalidTransition {
        report_id: i32,
        from: ReportStatus,
        to: ReportStatus,
    },
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("invalid fixture: {0}")]
    InvalidFixture(String),
}
