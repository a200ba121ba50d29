use entity::sales;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
};
use tracing::debug;

use crate::{ReportsError, ReportsResult, hierarchy, now, validate};

/// Insert payload; `password_hash` must already be hashed.
#[derive(Clone, Debug)]
pub struct NewSales {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub department: String,
    pub manager_id: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct Upserted {
    pub model: sales::Model,
    pub created: bool,
}

pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> ReportsResult<Option<sales::Model>> {
    Ok(sales::Entity::find()
        .filter(sales::Column::Email.eq(email))
        .one(db)
        .await?)
}

/// Create-if-absent keyed by email. An existing row is returned untouched.
pub async fn upsert_by_email<C: ConnectionTrait>(
    db: &C,
    new: NewSales,
) -> ReportsResult<Upserted> {
    validate::require_email(&new.email)?;
    if let Some(existing) = find_by_email(db, &new.email).await? {
        debug!(email = %existing.email, id = existing.id, "sales already present");
        return Ok(Upserted {
            model: existing,
            created: false,
        });
    }
    if let Some(manager_id) = new.manager_id {
        ensure_manager(db, manager_id).await?;
    }

    let ts = now();
    let model = sales::ActiveModel {
        name: Set(new.name),
        email: Set(new.email),
        password: Set(new.password_hash),
        department: Set(new.department),
        manager_id: Set(new.manager_id),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?;
    debug!(email = %model.email, id = model.id, "sales created");
    Ok(Upserted {
        model,
        created: true,
    })
}

/// Moves `sales_id` under `manager_id`, or detaches it with `None`.
pub async fn assign_manager<C: ConnectionTrait>(
    db: &C,
    sales_id: i32,
    manager_id: Option<i32>,
) -> ReportsResult<sales::Model> {
    let current = ensure_exists(db, sales_id).await?;
    if let Some(manager_id) = manager_id {
        if manager_id != sales_id {
            ensure_manager(db, manager_id).await?;
        }
        if hierarchy::would_create_cycle(db, sales_id, manager_id).await? {
            return Err(ReportsError::ManagerCycle {
                sales_id,
                manager_id,
            });
        }
    }

    let mut active: sales::ActiveModel = current.into();
    active.manager_id = Set(manager_id);
    active.updated_at = Set(now());
    Ok(active.update(db).await?)
}

pub(crate) async fn ensure_exists<C: ConnectionTrait>(
    db: &C,
    sales_id: i32,
) -> ReportsResult<sales::Model> {
    sales::Entity::find_by_id(sales_id)
        .one(db)
        .await?
        .ok_or(ReportsError::SalesNotFound(sales_id))
}

async fn ensure_manager<C: ConnectionTrait>(
    db: &C,
    manager_id: i32,
) -> ReportsResult<sales::Model> {
    match ensure_exists(db, manager_id).await {
        Err(ReportsError::SalesNotFound(id)) => Err(ReportsError::ManagerNotFound(id)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fresh_db;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, PaginatorTrait};

    fn new_sales(email: &str, manager_id: Option<i32>) -> NewSales {
        NewSales {
            name: email.split('@').next().unwrap_or_default().to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            department: "営業1課".to_string(),
            manager_id,
        }
    }

    #[tokio::test]
    async fn upsert_is_keyed_by_email() {
        let db = fresh_db().await;
        let first = upsert_by_email(&db, new_sales("tanaka@example.com", None))
            .await
            .unwrap();
        assert!(first.created);

        let mut renamed = new_sales("tanaka@example.com", None);
        renamed.name = "別名".into();
        let second = upsert_by_email(&db, renamed).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.model.id, first.model.id);
        assert_eq!(second.model.name, "tanaka");
        assert_eq!(sales::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn upsert_rejects_bad_email_and_unknown_manager() {
        let db = fresh_db().await;
        let err = upsert_by_email(&db, new_sales("invalid-email", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportsError::InvalidEmail(_)));

        let err = upsert_by_email(&db, new_sales("yamada@example.com", Some(42)))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportsError::ManagerNotFound(42)));
        assert_eq!(sales::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn assign_manager_prevents_cycles() {
        let db = fresh_db().await;
        let top = upsert_by_email(&db, new_sales("top@example.com", None))
            .await
            .unwrap()
            .model;
        let mid = upsert_by_email(&db, new_sales("mid@example.com", Some(top.id)))
            .await
            .unwrap()
            .model;
        let low = upsert_by_email(&db, new_sales("low@example.com", Some(mid.id)))
            .await
            .unwrap()
            .model;

        let err = assign_manager(&db, top.id, Some(low.id)).await.unwrap_err();
        assert!(matches!(err, ReportsError::ManagerCycle { .. }));
        let err = assign_manager(&db, mid.id, Some(mid.id)).await.unwrap_err();
        assert!(matches!(err, ReportsError::ManagerCycle { .. }));
        let err = assign_manager(&db, low.id, Some(99)).await.unwrap_err();
        assert!(matches!(err, ReportsError::ManagerNotFound(99)));

        let moved = assign_manager(&db, low.id, Some(top.id)).await.unwrap();
        assert_eq!(moved.manager_id, Some(top.id));
        let detached = assign_manager(&db, mid.id, None).await.unwrap();
        assert_eq!(detached.manager_id, None);

        let chain = hierarchy::manager_chain(&db, low.id).await.unwrap();
        assert_eq!(chain.iter().map(|m| m.id).collect::<Vec<_>>(), vec![top.id]);
        let reports = hierarchy::subordinates(&db, top.id).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(hierarchy::audit(&db).await.unwrap().roots, 2);
    }

    #[tokio::test]
    async fn store_rejects_duplicate_email() {
        let db = fresh_db().await;
        let ts = now();
        let row = || sales::ActiveModel {
            name: Set("dup".into()),
            email: Set("dup@example.com".into()),
            password: Set("x".into()),
            department: Set("営業部".into()),
            manager_id: Set(None),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        };
        row().insert(&db).await.unwrap();
        assert!(row().insert(&db).await.is_err());
        assert_eq!(sales::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn manager_lookup_failure_is_not_reported_as_missing() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<sales::Model>::new()])
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();

        let err = upsert_by_email(&db, new_sales("yamada@example.com", Some(7)))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportsError::Db(_)), "{err:?}");
    }
}
