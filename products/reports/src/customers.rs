use entity::customer;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{ReportsError, ReportsResult, now, sales};

#[derive(Clone, Debug)]
pub struct NewCustomer {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub industry: Option<String>,
    pub sales_id: i32,
}

/// Always inserts; customers have no natural key.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    new: NewCustomer,
) -> ReportsResult<customer::Model> {
    sales::ensure_exists(db, new.sales_id).await?;
    let ts = now();
    Ok(customer::ActiveModel {
        name: Set(new.name),
        address: Set(new.address),
        phone: Set(new.phone),
        industry: Set(new.industry),
        sales_id: Set(new.sales_id),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

pub async fn owned_by<C: ConnectionTrait>(
    db: &C,
    sales_id: i32,
) -> ReportsResult<Vec<customer::Model>> {
    Ok(customer::Entity::find()
        .filter(customer::Column::SalesId.eq(sales_id))
        .order_by_asc(customer::Column::Id)
        .all(db)
        .await?)
}

pub(crate) async fn ensure_exists<C: ConnectionTrait>(
    db: &C,
    customer_id: i32,
) -> ReportsResult<customer::Model> {
    customer::Entity::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or(ReportsError::CustomerNotFound(customer_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::{NewSales, upsert_by_email};
    use crate::testing::fresh_db;

    #[tokio::test]
    async fn customers_require_an_owner() {
        let db = fresh_db().await;
        let err = create(
            &db,
            NewCustomer {
                name: "ABC商事".into(),
                address: None,
                phone: None,
                industry: None,
                sales_id: 7,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ReportsError::SalesNotFound(7)));

        let owner = upsert_by_email(
            &db,
            NewSales {
                name: "山田太郎".into(),
                email: "yamada@example.com".into(),
                password_hash: "hash".into(),
                department: "営業1課".into(),
                manager_id: None,
            },
        )
        .await
        .unwrap()
        .model;
        let created = create(
            &db,
            NewCustomer {
                name: "ABC商事".into(),
                address: Some("東京都千代田区1-1-1".into()),
                phone: Some("03-1234-5678".into()),
                industry: Some("製造業".into()),
                sales_id: owner.id,
            },
        )
        .await
        .unwrap();
        assert_eq!(created.sales_id, owner.id);
        let owned = owned_by(&db, owner.id).await.unwrap();
        assert_eq!(owned, vec![created]);
    }
}
