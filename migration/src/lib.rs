pub use sea_orm_migration::prelude::*;

mod m20260205_000001_sales_customers;
mod m20260205_000002_daily_reports;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260205_000001_sales_customers::Migration),
            Box::new(m20260205_000002_daily_reports::Migration),
        ]
    }
}
