use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "visit_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub report_id: i32,
    #[sea_orm(indexed)]
    pub customer_id: i32,
    pub visit_time: Time,
    #[sea_orm(column_type = "Text")]
    pub visit_content: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::daily_report::Entity",
        from = "Column::ReportId",
        to = "super::daily_report::Column::Id",
        on_delete = "Cascade"
    )]
    DailyReport,
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Restrict"
    )]
    Customer,
}

impl Related<super::daily_report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyReport.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
