//! Demo fixture seeding.
//!
//! Sales rows are upserted by email, so running the routine twice leaves the
//! sales table unchanged. Customers, the report, its visits and the comment
//! are plain inserts and are duplicated on every run. There is no
//! transaction: the first failing statement aborts the run and earlier rows
//! stay in place.

use chrono::{Local, NaiveDate, NaiveTime};
use entity::{ReportStatus, comment, customer, daily_report, sales, visit_record};
use sea_orm::ConnectionTrait;
use tracing::info;

use crate::{
    ReportsError, ReportsResult, customers,
    customers::NewCustomer,
    password::hash_password,
    reports::{self, NewDailyReport, NewVisit},
    sales::{NewSales, upsert_by_email},
};

pub const DEFAULT_SEED_PASSWORD: &str = "password123";

struct SalesFixture {
    name: &'static str,
    email: &'static str,
    department: &'static str,
}

const MANAGER: SalesFixture = SalesFixture {
    name: "田中課長",
    email: "tanaka@example.com",
    department: "営業部",
};

const SUBORDINATES: [SalesFixture; 3] = [
    SalesFixture {
        name: "山田太郎",
        email: "yamada@example.com",
        department: "営業1課",
    },
    SalesFixture {
        name: "佐藤花子",
        email: "sato@example.com",
        department: "営業1課",
    },
    SalesFixture {
        name: "鈴木一郎",
        email: "suzuki@example.com",
        department: "営業1課",
    },
];

const ADMIN: SalesFixture = SalesFixture {
    name: "管理者",
    email: "admin@example.com",
    department: "管理部",
};

// (name, address, phone, industry, owner email)
const CUSTOMERS: [(&str, &str, &str, &str, &str); 3] = [
    ("ABC商事", "東京都千代田区1-1-1", "03-1234-5678", "製造業", "yamada@example.com"),
    ("XYZ株式会社", "東京都港区2-2-2", "03-5678-9012", "IT業", "yamada@example.com"),
    ("DEF物産", "東京都新宿区3-3-3", "03-9012-3456", "商社", "sato@example.com"),
];

const REPORT_AUTHOR: &str = "yamada@example.com";
const REPORT_PROBLEM: &str = "ABC商事の予算が厳しいため、値引き交渉が必要。";
const REPORT_PLAN: &str = "ABC商事に見積もり再提出\nDEF株式会社にアポイント電話";

// (customer name, hour, minute, content)
const VISITS: [(&str, u32, u32, &str); 2] = [
    ("ABC商事", 10, 0, "新商品の提案を実施。好感触を得た。"),
    ("XYZ株式会社", 14, 0, "契約更新について相談。価格交渉中。"),
];

const COMMENT: &str = "ABC商事の値引きは10%までOKです。頑張って！";

#[derive(Clone, Debug)]
pub struct SeedOptions {
    /// Clear-text password shared by every seeded sales row.
    pub password: String,
    pub include_admin: bool,
    pub report_date: NaiveDate,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            password: DEFAULT_SEED_PASSWORD.to_string(),
            include_admin: false,
            report_date: Local::now().date_naive(),
        }
    }
}

/// Everything the routine created or found.
#[derive(Clone, Debug, Default)]
pub struct SeededRecords {
    pub sales: Vec<sales::Model>,
    /// Emails of sales rows that already existed before this run.
    pub reused_sales: Vec<String>,
    pub customers: Vec<customer::Model>,
    pub reports: Vec<daily_report::Model>,
    pub visits: Vec<visit_record::Model>,
    pub comments: Vec<comment::Model>,
}

impl SeededRecords {
    pub fn sales_by_email(&self, email: &str) -> Option<&sales::Model> {
        self.sales.iter().find(|s| s.email == email)
    }

    pub fn customer_named(&self, name: &str) -> Option<&customer::Model> {
        self.customers.iter().find(|c| c.name == name)
    }

    fn require_sales(&self, email: &str) -> ReportsResult<&sales::Model> {
        self.sales_by_email(email)
            .ok_or_else(|| ReportsError::InvalidFixture(format!("unknown sales {email}")))
    }

    fn require_customer(&self, name: &str) -> ReportsResult<&customer::Model> {
        self.customer_named(name)
            .ok_or_else(|| ReportsError::InvalidFixture(format!("unknown customer {name}")))
    }
}

pub async fn run<C: ConnectionTrait>(
    db: &C,
    options: &SeedOptions,
) -> ReportsResult<SeededRecords> {
    info!("start seeding");
    let password_hash = hash_password(&options.password)?;
    let mut seeded = SeededRecords::default();

    let manager = upsert_fixture(db, &mut seeded, &MANAGER, &password_hash, None).await?;
    info!(manager = %manager.name, "manager ready");

    for fixture in &SUBORDINATES {
        upsert_fixture(db, &mut seeded, fixture, &password_hash, Some(manager.id)).await?;
    }
    let names = SUBORDINATES.map(|f| f.name).join(", ");
    info!(sales = %names, "sales ready");

    if options.include_admin {
        let admin = upsert_fixture(db, &mut seeded, &ADMIN, &password_hash, None).await?;
        info!(admin = %admin.name, "admin ready");
    }

    for (name, address, phone, industry, owner) in CUSTOMERS {
        let owner_id = seeded.require_sales(owner)?.id;
        let created = customers::create(
            db,
            NewCustomer {
                name: name.to_string(),
                address: Some(address.to_string()),
                phone: Some(phone.to_string()),
                industry: Some(industry.to_string()),
                sales_id: owner_id,
            },
        )
        .await?;
        seeded.customers.push(created);
    }
    info!(count = seeded.customers.len(), "customers created");

    let author = seeded.require_sales(REPORT_AUTHOR)?.clone();
    let report = reports::create(
        db,
        NewDailyReport {
            sales_id: author.id,
            report_date: options.report_date,
            problem: Some(REPORT_PROBLEM.to_string()),
            plan: Some(REPORT_PLAN.to_string()),
            status: ReportStatus::Submitted,
        },
    )
    .await?;
    info!(author = %author.name, date = %report.report_date, "daily report created");

    let mut visits = Vec::with_capacity(VISITS.len());
    for (customer_name, hour, minute, content) in VISITS {
        let visit_time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            ReportsError::InvalidFixture(format!("visit time {hour}:{minute:02}"))
        })?;
        visits.push(NewVisit {
            customer_id: seeded.require_customer(customer_name)?.id,
            visit_time,
            visit_content: content.to_string(),
        });
    }
    seeded.visits = reports::add_visits(db, report.id, visits).await?;
    info!(count = seeded.visits.len(), "visit records created");

    let comment = reports::add_comment(db, report.id, manager.id, COMMENT).await?;
    info!(commenter = %manager.name, "comment created");
    seeded.reports.push(report);
    seeded.comments.push(comment);

    info!("seeding finished");
    Ok(seeded)
}

async fn upsert_fixture<C: ConnectionTrait>(
    db: &C,
    seeded: &mut SeededRecords,
    fixture: &SalesFixture,
    password_hash: &str,
    manager_id: Option<i32>,
) -> ReportsResult<sales::Model> {
    let upserted = upsert_by_email(
        db,
        NewSales {
            name: fixture.name.to_string(),
            email: fixture.email.to_string(),
            password_hash: password_hash.to_string(),
            department: fixture.department.to_string(),
            manager_id,
        },
    )
    .await?;
    if !upserted.created {
        seeded.reused_sales.push(upserted.model.email.clone());
    }
    seeded.sales.push(upserted.model.clone());
    Ok(upserted.model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hierarchy, password::verify_password, reports::TableCounts, testing::fresh_db};

    fn options() -> SeedOptions {
        SeedOptions {
            report_date: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
            ..SeedOptions::default()
        }
    }

    #[tokio::test]
    async fn seeds_the_fixture_set() {
        let db = fresh_db().await;
        let seeded = run(&db, &options()).await.unwrap();

        assert_eq!(
            reports::counts(&db).await.unwrap(),
            TableCounts {
                sales: 4,
                customers: 3,
                daily_reports: 1,
                visit_records: 2,
                comments: 1,
            }
        );
        assert!(seeded.reused_sales.is_empty());

        let manager = seeded.sales_by_email("tanaka@example.com").unwrap();
        assert_eq!(manager.manager_id, None);
        for fixture in &SUBORDINATES {
            let row = seeded.sales_by_email(fixture.email).unwrap();
            assert_eq!(row.manager_id, Some(manager.id));
            assert_eq!(row.department, "営業1課");
        }
        assert!(seeded.sales_by_email("admin@example.com").is_none());

        let report = &seeded.reports[0];
        assert_eq!(report.status, ReportStatus::Submitted);
        assert_eq!(report.sales_id, seeded.sales_by_email("yamada@example.com").unwrap().id);
        assert_eq!(report.plan.as_deref(), Some(REPORT_PLAN));

        let abc = seeded.customer_named("ABC商事").unwrap();
        assert_eq!(seeded.visits[0].customer_id, abc.id);
        assert_eq!(
            seeded.visits[0].visit_time,
            NaiveTime::from_hms_opt(10, 0, 0).unwrap()
        );
        assert_eq!(seeded.comments[0].commenter_id, manager.id);

        assert_eq!(hierarchy::audit(&db).await.unwrap().max_depth, 1);
    }

    #[tokio::test]
    async fn passwords_are_hashed() {
        let db = fresh_db().await;
        let seeded = run(&db, &options()).await.unwrap();
        for row in &seeded.sales {
            assert_ne!(row.password, DEFAULT_SEED_PASSWORD);
            assert!(verify_password(DEFAULT_SEED_PASSWORD, &row.password).unwrap());
        }
    }

    #[tokio::test]
    async fn rerun_keeps_sales_but_duplicates_children() {
        let db = fresh_db().await;
        let first = run(&db, &options()).await.unwrap();
        let second = run(&db, &options()).await.unwrap();

        assert_eq!(second.reused_sales.len(), 4);
        assert_eq!(
            first.sales.iter().map(|s| s.id).collect::<Vec<_>>(),
            second.sales.iter().map(|s| s.id).collect::<Vec<_>>()
        );
        let counts = reports::counts(&db).await.unwrap();
        assert_eq!(counts.sales, 4);
        assert_eq!(counts.customers, 6);
        assert_eq!(counts.daily_reports, 2);
        assert_eq!(counts.visit_records, 4);
        assert_eq!(counts.comments, 2);
    }

    #[tokio::test]
    async fn admin_is_opt_in() {
        let db = fresh_db().await;
        let seeded = run(
            &db,
            &SeedOptions {
                include_admin: true,
                ..options()
            },
        )
        .await
        .unwrap();
        let admin = seeded.sales_by_email("admin@example.com").unwrap();
        assert_eq!(admin.manager_id, None);
        assert_eq!(admin.department, "管理部");
        assert_eq!(reports::counts(&db).await.unwrap().sales, 5);
        assert_eq!(hierarchy::audit(&db).await.unwrap().roots, 2);
    }
}
