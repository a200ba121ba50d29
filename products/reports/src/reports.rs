//! Daily reports, their visit records and comments.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use entity::{ReportStatus, comment, customer, daily_report, sales, visit_record};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use tracing::info;

use crate::{ReportsError, ReportsResult, customers, now, sales as sales_ops};

#[derive(Clone, Debug)]
pub struct NewDailyReport {
    pub sales_id: i32,
    pub report_date: NaiveDate,
    pub problem: Option<String>,
    pub plan: Option<String>,
    pub status: ReportStatus,
}

impl NewDailyReport {
    pub fn draft(sales_id: i32, report_date: NaiveDate) -> Self {
        Self {
            sales_id,
            report_date,
            problem: None,
            plan: None,
            status: ReportStatus::Draft,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewVisit {
    pub customer_id: i32,
    pub visit_time: NaiveTime,
    pub visit_content: String,
}

/// Row counts per table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub sales: u64,
    pub customers: u64,
    pub daily_reports: u64,
    pub visit_records: u64,
    pub comments: u64,
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    new: NewDailyReport,
) -> ReportsResult<daily_report::Model> {
    sales_ops::ensure_exists(db, new.sales_id).await?;
    let ts = now();
    Ok(daily_report::ActiveModel {
        sales_id: Set(new.sales_id),
        report_date: Set(new.report_date),
        problem: Set(new.problem),
        plan: Set(new.plan),
        status: Set(new.status),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

/// Draft to submitted. Nothing moves backwards.
pub async fn submit<C: ConnectionTrait>(
    db: &C,
    report_id: i32,
) -> ReportsResult<daily_report::Model> {
    let report = ensure_exists(db, report_id).await?;
    let next = ReportStatus::Submitted;
    if !report.status.can_transition_to(next) {
        return Err(ReportsError::InvalidTransition {
            report_id,
            from: report.status,
            to: next,
        });
    }
    let mut active: daily_report::ActiveModel = report.into();
    active.status = Set(next);
    active.updated_at = Set(now());
    let updated = active.update(db).await?;
    info!(report_id, "daily report submitted");
    Ok(updated)
}

/// Inserts all visits in one statement and returns every visit on the report.
pub async fn add_visits<C: ConnectionTrait>(
    db: &C,
    report_id: i32,
    visits: Vec<NewVisit>,
) -> ReportsResult<Vec<visit_record::Model>> {
    ensure_exists(db, report_id).await?;
    let customer_ids: BTreeSet<i32> = visits.iter().map(|v| v.customer_id).collect();
    for customer_id in customer_ids {
        customers::ensure_exists(db, customer_id).await?;
    }

    if !visits.is_empty() {
        let ts = now();
        let rows = visits.into_iter().map(|visit| visit_record::ActiveModel {
            report_id: Set(report_id),
            customer_id: Set(visit.customer_id),
            visit_time: Set(visit.visit_time),
            visit_content: Set(visit.visit_content),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        });
        visit_record::Entity::insert_many(rows).exec(db).await?;
    }
    visits_for(db, report_id).await
}

pub async fn visits_for<C: ConnectionTrait>(
    db: &C,
    report_id: i32,
) -> ReportsResult<Vec<visit_record::Model>> {
    Ok(visit_record::Entity::find()
        .filter(visit_record::Column::ReportId.eq(report_id))
        .order_by_asc(visit_record::Column::VisitTime)
        .order_by_asc(visit_record::Column::Id)
        .all(db)
        .await?)
}

pub async fn add_comment<C: ConnectionTrait>(
    db: &C,
    report_id: i32,
    commenter_id: i32,
    content: impl Into<String>,
) -> ReportsResult<comment::Model> {
    ensure_exists(db, report_id).await?;
    sales_ops::ensure_exists(db, commenter_id).await?;
    let ts = now();
    Ok(comment::ActiveModel {
        report_id: Set(report_id),
        commenter_id: Set(commenter_id),
        comment_content: Set(content.into()),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

pub async fn comments_for<C: ConnectionTrait>(
    db: &C,
    report_id: i32,
) -> ReportsResult<Vec<comment::Model>> {
    Ok(comment::Entity::find()
        .filter(comment::Column::ReportId.eq(report_id))
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await?)
}

pub async fn reports_by<C: ConnectionTrait>(
    db: &C,
    sales_id: i32,
) -> ReportsResult<Vec<daily_report::Model>> {
    Ok(daily_report::Entity::find()
        .filter(daily_report::Column::SalesId.eq(sales_id))
        .order_by_desc(daily_report::Column::ReportDate)
        .order_by_desc(daily_report::Column::Id)
        .all(db)
        .await?)
}

pub async fn counts<C: ConnectionTrait>(db: &C) -> ReportsResult<TableCounts> {
    Ok(TableCounts {
        sales: sales::Entity::find().count(db).await?,
        customers: customer::Entity::find().count(db).await?,
        daily_reports: daily_report::Entity::find().count(db).await?,
        visit_records: visit_record::Entity::find().count(db).await?,
        comments: comment::Entity::find().count(db).await?,
    })
}

async fn ensure_exists<C: ConnectionTrait>(
    db: &C,
    report_id: i32,
) -> ReportsResult<daily_report::Model> {
    daily_report::Entity::find_by_id(report_id)
        .one(db)
        .await?
        .ok_or(ReportsError::ReportNotFound(report_id))
}
