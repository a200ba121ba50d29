use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "daily_report")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub sales_id: i32,
    pub report_date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub problem: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub plan: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sales::Entity",
        from = "Column::SalesId",
        to = "super::sales::Column::Id",
        on_delete = "Cascade"
    )]
    Sales,
    #[sea_orm(has_many = "super::visit_record::Entity")]
    VisitRecord,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl Related<super::visit_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VisitRecord.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle of a daily report. Stored lowercase; matching is case-sensitive.
#[derive(Copy, Clone, Debug, Default, EnumIter, DeriveActiveEnum, Eq, PartialEq, Hash)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum ReportStatus {
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "submitted")]
    Submitted,
}

impl ReportStatus {
    /// Only draft reports can move, and only forward to submitted.
    pub fn can_transition_to(self, next: ReportStatus) -> bool {
        matches!((self, next), (ReportStatus::Draft, ReportStatus::Submitted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn status_literals_are_case_sensitive() {
        let parse = |raw: &str| ReportStatus::try_from_value(&raw.to_string()).ok();
        assert_eq!(parse("draft"), Some(ReportStatus::Draft));
        assert_eq!(parse("submitted"), Some(ReportStatus::Submitted));
        assert_eq!(parse("DRAFT"), None);
        assert_eq!(parse("Submitted"), None);
        assert_eq!(parse("approved"), None);
    }

    #[test]
    fn stored_literals_are_lowercase() {
        let stored: Vec<String> = ReportStatus::iter().map(|s| s.to_value()).collect();
        assert_eq!(stored, ["draft", "submitted"]);
    }

    #[test]
    fn only_draft_to_submitted_is_allowed() {
        assert!(ReportStatus::Draft.can_transition_to(ReportStatus::Submitted));
        assert!(!ReportStatus::Submitted.can_transition_to(ReportStatus::Draft));
        assert!(!ReportStatus::Draft.can_transition_to(ReportStatus::Draft));
        assert!(!ReportStatus::Submitted.can_transition_to(ReportStatus::Submitted));
        assert_eq!(ReportStatus::default(), ReportStatus::Draft);
    }
}
