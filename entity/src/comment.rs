use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub report_id: i32,
    #[sea_orm(indexed)]
    pub commenter_id: i32,
    #[sea_orm(column_type = "Text")]
    pub comment_content: String,
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
        belongs_to = "super::sales::Entity",
        from = "Column::CommenterId",
        to = "super::sales::Column::Id",
        on_delete = "Cascade"
    )]
    Commenter,
}

impl Related<super::daily_report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyReport.def()
    }
}

impl Related<super::sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Commenter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
