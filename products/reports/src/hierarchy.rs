//! Manager hierarchy over the self-referencing `sales.manager_id` column.

use std::collections::{HashMap, HashSet};

use entity::sales;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};

use crate::{ReportsError, ReportsResult};

/// Result of a full hierarchy audit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub sales: usize,
    pub roots: usize,
    pub max_depth: usize,
}

/// Managers of `sales_id`, nearest first, ending at a row without a manager.
pub async fn manager_chain<C: ConnectionTrait>(
    db: &C,
    sales_id: i32,
) -> ReportsResult<Vec<sales::Model>> {
    let start = sales::Entity::find_by_id(sales_id)
        .one(db)
        .await?
        .ok_or(ReportsError::SalesNotFound(sales_id))?;

    let mut seen = HashSet::from([start.id]);
    let mut chain = Vec::new();
    let mut current = start;
    while let Some(manager_id) = current.manager_id {
        if !seen.insert(manager_id) {
            return Err(ReportsError::ManagerCycle {
                sales_id,
                manager_id,
            });
        }
        let manager = current
            .find_linked(sales::ManagerLink)
            .one(db)
            .await?
            .ok_or(ReportsError::ManagerNotFound(manager_id))?;
        chain.push(manager.clone());
        current = manager;
    }
    Ok(chain)
}

pub async fn subordinates<C: ConnectionTrait>(
    db: &C,
    manager_id: i32,
) -> ReportsResult<Vec<sales::Model>> {
    Ok(sales::Entity::find()
        .filter(sales::Column::ManagerId.eq(manager_id))
        .order_by_asc(sales::Column::Id)
        .all(db)
        .await?)
}

/// True when making `manager_id` the manager of `sales_id` closes a loop.
pub async fn would_create_cycle<C: ConnectionTrait>(
    db: &C,
    sales_id: i32,
    manager_id: i32,
) -> ReportsResult<bool> {
    if sales_id == manager_id {
        return Ok(true);
    }
    let chain = manager_chain(db, manager_id).await?;
    Ok(chain.iter().any(|m| m.id == sales_id))
}

/// Checks every `manager_id` resolves and every chain terminates.
pub async fn audit<C: ConnectionTrait>(db: &C) -> ReportsResult<AuditSummary> {
    let edges: HashMap<i32, Option<i32>> = sales::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|row| (row.id, row.manager_id))
        .collect();
    audit_edges(&edges)
}

pub(crate) fn audit_edges(edges: &HashMap<i32, Option<i32>>) -> ReportsResult<AuditSummary> {
    let mut summary = AuditSummary {
        sales: edges.len(),
        ..AuditSummary::default()
    };
    for (&id, &manager) in edges {
        match manager {
            None => summary.roots += 1,
            Some(manager_id) if !edges.contains_key(&manager_id) => {
                return Err(ReportsError::ManagerNotFound(manager_id));
            }
            Some(_) => {}
        }

        let mut seen = HashSet::from([id]);
        let mut depth = 0;
        let mut cursor = manager;
        while let Some(manager_id) = cursor {
            if !seen.insert(manager_id) {
                return Err(ReportsError::ManagerCycle {
                    sales_id: id,
                    manager_id,
                });
            }
            depth += 1;
            cursor = edges.get(&manager_id).copied().flatten();
        }
        summary.max_depth = summary.max_depth.max(depth);
    }
    Ok(summary)
}
