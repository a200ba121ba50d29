use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum Sales {
    Table,
    Id,
    Name,
    Email,
    Password,
    Department,
    ManagerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Customer {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Industry,
    SalesId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sales::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Sales::Email).string_len(320).not_null())
                    .col(ColumnDef::new(Sales::Password).string_len(256).not_null())
                    .col(ColumnDef::new(Sales::Department).string_len(128).not_null())
                    .col(ColumnDef::new(Sales::ManagerId).integer())
                    .col(
                        ColumnDef::new(Sales::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sales::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_manager")
                            .from(Sales::Table, Sales::ManagerId)
                            .to(Sales::Table, Sales::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sales_email")
                    .table(Sales::Table)
                    .col(Sales::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sales_manager")
                    .table(Sales::Table)
                    .col(Sales::ManagerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customer::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Customer::Address).string_len(512))
                    .col(ColumnDef::new(Customer::Phone).string_len(64))
                    .col(ColumnDef::new(Customer::Industry).string_len(128))
                    .col(ColumnDef::new(Customer::SalesId).integer().not_null())
                    .col(
                        ColumnDef::new(Customer::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Customer::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_sales")
                            .from(Customer::Table, Customer::SalesId)
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
                    .name("idx_customer_sales")
                    .table(Customer::Table)
                    .col(Customer::SalesId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customer::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sales::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
