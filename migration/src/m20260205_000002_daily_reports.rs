use sea_orm_migration::prelude::*;

use crate::m20260205_000001_sales_customers::{Customer, Sales};

#[derive(DeriveIden)]
enum DailyReport {
    Table,
    Id,
    SalesId,
    ReportDate,
    Problem,
    Plan,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum VisitRecord {
    Table,
    Id,
    ReportId,
    CustomerId,
    VisitTime,
    VisitContent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Comment {
    Table,
    Id,
    ReportId,
    CommenterId,
    CommentContent,
    CreatedAt,
    UpdatedAt,
}

const REPORT_STATUS_VALUES: [&str; 2] = ["draft", "submitted"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyReport::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyReport::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyReport::SalesId).integer().not_null())
                    .col(ColumnDef::new(DailyReport::ReportDate).date().not_null())
                    .col(ColumnDef::new(DailyReport::Problem).text())
                    .col(ColumnDef::new(DailyReport::Plan).text())
                    .col(
                        ColumnDef::new(DailyReport::Status)
                            .string_len(16)
                            .not_null()
                            .default(REPORT_STATUS_VALUES[0])
                            .check(Expr::col(DailyReport::Status).is_in(REPORT_STATUS_VALUES)),
                    )
                    .col(
                        ColumnDef::new(DailyReport::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DailyReport::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_daily_report_sales")
                            .from(DailyReport::Table, DailyReport::SalesId)
                            .to(Sales::Table, Sales::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_daily_report_sales_date")
                    .table(DailyReport::Table)
                    .col(DailyReport::SalesId)
                    .col(DailyReport::ReportDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VisitRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VisitRecord::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VisitRecord::ReportId).integer().not_null())
                    .col(ColumnDef::new(VisitRecord::CustomerId).integer().not_null())
                    .col(ColumnDef::new(VisitRecord::VisitTime).time().not_null())
                    .col(ColumnDef::new(VisitRecord::VisitContent).text().not_null())
                    .col(
                        ColumnDef::new(VisitRecord::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(VisitRecord::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visit_record_report")
                            .from(VisitRecord::Table, VisitRecord::ReportId)
                            .to(DailyReport::Table, DailyReport::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visit_record_customer")
                            .from(VisitRecord::Table, VisitRecord::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visit_record_report")
                    .table(VisitRecord::Table)
                    .col(VisitRecord::ReportId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visit_record_customer")
                    .table(VisitRecord::Table)
                    .col(VisitRecord::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comment::ReportId).integer().not_null())
                    .col(ColumnDef::new(Comment::CommenterId).integer().not_null())
                    .col(ColumnDef::new(Comment::CommentContent).text().not_null())
                    .col(
                        ColumnDef::new(Comment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Comment::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_report")
                            .from(Comment::Table, Comment::ReportId)
                            .to(DailyReport::Table, DailyReport::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_commenter")
                            .from(Comment::Table, Comment::CommenterId)
                            .to(Sales::Table, Sales::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comment_report")
                    .table(Comment::Table)
                    .col(Comment::ReportId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comment::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VisitRecord::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyReport::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
