//! 选课存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{LmsError, Result};
use crate::models::courses::{entities::Enrollment, responses::EnrolledStudent};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::debug;

impl SeaOrmStorage {
    async fn find_enrollment(&self, user_id: i64, course_id: i64) -> Result<Option<Model>> {
        Enrollments::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query enrollment: {e}")))
    }

    /// 学生选课
    ///
    /// (user_id, course_id) 唯一；已存在时返回原记录。并发插入撞上唯一索引时重新读取。
    pub async fn enroll_student_impl(&self, user_id: i64, course_id: i64) -> Result<Enrollment> {
        if let Some(existing) = self.find_enrollment(user_id, course_id).await? {
            return Ok(existing.into_enrollment());
        }

        let model = ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(created) => Ok(created.into_enrollment()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(
                    "Concurrent enrollment for user {} in course {}",
                    user_id, course_id
                );
                self.find_enrollment(user_id, course_id)
                    .await?
                    .map(|m| m.into_enrollment())
                    .ok_or_else(|| {
                        LmsError::database_operation("Enrollment vanished after conflict")
                    })
            }
            Err(e) => Err(LmsError::database_operation(format!(
                "Failed to create enrollment: {e}"
            ))),
        }
    }

    /// 课程学生名单，按选课时间升序
    pub async fn list_enrolled_students_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<EnrolledStudent>> {
        let enrollments = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list enrollments: {e}")))?;

        if enrollments.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i64> = enrollments.iter().map(|e| e.user_id).collect();
        let emails: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query users: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.email))
            .collect();

        Ok(enrollments
            .into_iter()
            .filter_map(|e| {
                let email = emails.get(&e.user_id)?.clone();
                let enrollment = e.into_enrollment();
                Some(EnrolledStudent {
                    id: enrollment.user_id,
                    email,
                    enrolled_at: enrollment.created_at,
                })
            })
            .collect())
    }
}
