//! 课程模块存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::modules::{ActiveModel, Column, Entity as Modules};
use crate::errors::{LmsError, Result};
use crate::models::modules::entities::Module;
use crate::policy::rules::COURSE_NOT_FOUND;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

impl SeaOrmStorage {
    /// 追加模块
    ///
    /// 先锁住课程行再读取最大 order，同一课程的并发追加因此串行执行，order 保持 1..N 连续。
    pub async fn create_module_impl(&self, course_id: i64, title: &str) -> Result<Module> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to begin transaction: {e}")))?;

        lock_course(&txn, course_id).await?;

        // 查询当前最大排序号
        let max_order = Modules::find()
            .filter(Column::CourseId.eq(course_id))
            .select_only()
            .column_as(Column::Order.max(), "max_order")
            .into_tuple::<Option<i32>>()
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query max order: {e}")))?
            .flatten()
            .unwrap_or(0);

        let model = ActiveModel {
            course_id: Set(course_id),
            title: Set(title.to_string()),
            order: Set(max_order + 1),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let created = model
            .insert(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to create module: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to commit: {e}")))?;

        Ok(created.into_module())
    }

    /// 按 order 升序列出模块
    pub async fn list_modules_impl(&self, course_id: i64) -> Result<Vec<Module>> {
        let modules = Modules::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Order)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list modules: {e}")))?;

        Ok(modules.into_iter().map(|m| m.into_module()).collect())
    }

    /// 原子重排
    ///
    /// 与追加一样先锁住课程行；校验与全部更新在同一事务内：列表必须恰好是该课程
    /// 全部模块的一个排列，否则返回 Conflict。任何一步失败时事务随 `txn` 被丢弃而回滚。
    pub async fn apply_module_order_atomically_impl(
        &self,
        course_id: i64,
        module_ids_in_order: &[i64],
    ) -> Result<Vec<Module>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to begin transaction: {e}")))?;

        lock_course(&txn, course_id).await?;

        let matching = count_modules_matching(&txn, course_id, module_ids_in_order).await?;
        let total = Modules::find()
            .filter(Column::CourseId.eq(course_id))
            .count(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to count modules: {e}")))?;

        let expected = module_ids_in_order.len() as u64;
        if matching != expected || total != expected {
            info!(
                course_id,
                matching, total, expected, "Rejected module reorder with mismatched id set"
            );
            return Err(LmsError::conflict(
                "module_ids_in_order must contain every module of this course exactly once",
            ));
        }

        let mut current: HashMap<i64, _> = Modules::find()
            .filter(Column::CourseId.eq(course_id))
            .all(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query modules: {e}")))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        for (index, module_id) in module_ids_in_order.iter().enumerate() {
            let model = current.remove(module_id).ok_or_else(|| {
                LmsError::conflict(format!("Module {module_id} does not belong to this course"))
            })?;
            let order = index as i32 + 1;
            if model.order == order {
                continue;
            }

            let mut active = model.into_active_model();
            active.order = Set(order);
            active
                .update(&txn)
                .await
                .map_err(|e| LmsError::database_operation(format!("Failed to update module: {e}")))?;
        }

        let modules = Modules::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Order)
            .all(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list modules: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to commit: {e}")))?;

        Ok(modules.into_iter().map(|m| m.into_module()).collect())
    }
}

// 写一次课程行以取得锁：PostgreSQL/MySQL 上是行锁，SQLite 上是库级写锁。
// 锁一直持有到事务结束。
async fn lock_course<C: ConnectionTrait>(conn: &C, course_id: i64) -> Result<()> {
    let result = Courses::update_many()
        .col_expr(CourseColumn::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
        .filter(CourseColumn::Id.eq(course_id))
        .exec(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("Failed to lock course: {e}")))?;

    if result.rows_affected == 0 {
        return Err(LmsError::not_found(COURSE_NOT_FOUND));
    }
    Ok(())
}

// 课程内 ID 在列表中的模块数
pub(super) async fn count_modules_matching<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    module_ids: &[i64],
) -> Result<u64> {
    if module_ids.is_empty() {
        return Ok(0);
    }

    Modules::find()
        .filter(Column::CourseId.eq(course_id))
        .filter(Column::Id.is_in(module_ids.iter().copied()))
        .count(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("Failed to count modules: {e}")))
}
