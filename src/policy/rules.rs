//! 纯函数规则
//!
//! 每个动作一条规则，只依赖主体与已解析的事实，不访问存储。
//! 事实为 `None` 表示资源不存在，此时一律返回 not_found，优先于 forbidden。

use super::{Actor, CourseAccess, Decision, SubmissionOwnerChain};
use crate::models::users::entities::UserRole;

pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const ASSIGNMENT_NOT_FOUND: &str = "Assignment not found";
pub const SUBMISSION_NOT_FOUND: &str = "Submission not found";
pub const STUDENT_NOT_FOUND: &str = "Student not found";

fn is_owner(actor: &Actor, course: &CourseAccess) -> bool {
    course.teacher_id == actor.id
}

fn owner_or_enrolled(
    actor: &Actor,
    course: Option<&CourseAccess>,
    not_found: &'static str,
) -> Decision {
    match course {
        None => Decision::not_found(not_found),
        Some(c) if is_owner(actor, c) || c.enrolled => Decision::Allow,
        Some(_) => Decision::forbidden("Not enrolled in this course"),
    }
}

fn owner_only(
    actor: &Actor,
    course: Option<&CourseAccess>,
    not_found: &'static str,
    forbidden: &'static str,
) -> Decision {
    match course {
        None => Decision::not_found(not_found),
        Some(c) if is_owner(actor, c) => Decision::Allow,
        Some(_) => Decision::forbidden(forbidden),
    }
}

/// 创建课程：仅教师
pub fn create_course(actor: &Actor) -> Decision {
    if actor.role == UserRole::Teacher {
        Decision::Allow
    } else {
        Decision::forbidden("Only teachers can create courses")
    }
}

/// 读取课程及其下的模块、作业
pub fn read_course(actor: &Actor, course: Option<&CourseAccess>) -> Decision {
    owner_or_enrolled(actor, course, COURSE_NOT_FOUND)
}

/// 读取模块列表
pub fn read_modules(actor: &Actor, course: Option<&CourseAccess>) -> Decision {
    owner_or_enrolled(actor, course, COURSE_NOT_FOUND)
}

/// 为课程添加学生
///
/// `target_role` 为 `None` 表示按邮箱找不到该用户。
pub fn enroll_student(
    actor: &Actor,
    course: Option<&CourseAccess>,
    target_role: Option<UserRole>,
) -> Decision {
    let decision = owner_only(
        actor,
        course,
        COURSE_NOT_FOUND,
        "Only this course's teacher can enroll students",
    );
    if !decision.is_allowed() {
        return decision;
    }

    match target_role {
        None => Decision::not_found(STUDENT_NOT_FOUND),
        Some(UserRole::Student) => Decision::Allow,
        Some(_) => Decision::forbidden("User is not a student"),
    }
}

/// 查看课程选课名单
pub fn list_enrollments(actor: &Actor, course: Option<&CourseAccess>) -> Decision {
    owner_only(
        actor,
        course,
        COURSE_NOT_FOUND,
        "Only this course's teacher can view enrollments",
    )
}

/// 创建或重排模块
pub fn manage_modules(actor: &Actor, course: Option<&CourseAccess>) -> Decision {
    owner_only(
        actor,
        course,
        COURSE_NOT_FOUND,
        "Only this course's teacher can manage modules",
    )
}

/// 创建作业
pub fn create_assignment(actor: &Actor, course: Option<&CourseAccess>) -> Decision {
    owner_only(
        actor,
        course,
        COURSE_NOT_FOUND,
        "Only this course's teacher can add assignments",
    )
}

/// 读取作业，`course` 为作业所属课程的事实
pub fn read_assignment(actor: &Actor, course: Option<&CourseAccess>) -> Decision {
    owner_or_enrolled(actor, course, ASSIGNMENT_NOT_FOUND)
}

/// 学生提交或覆盖自己的作业
pub fn submit(actor: &Actor, course: Option<&CourseAccess>) -> Decision {
    match course {
        None => Decision::not_found(ASSIGNMENT_NOT_FOUND),
        Some(_) if actor.role != UserRole::Student => {
            Decision::forbidden("Only students can submit")
        }
        Some(c) if c.enrolled => Decision::Allow,
        Some(_) => Decision::forbidden("Not enrolled in this course"),
    }
}

/// 读取单个提交：仅提交者本人
pub fn read_own_submission(actor: &Actor, chain: Option<&SubmissionOwnerChain>) -> Decision {
    match chain {
        None => Decision::not_found(SUBMISSION_NOT_FOUND),
        Some(c) if c.student_id == actor.id => Decision::Allow,
        Some(_) => Decision::forbidden("Not the owner of this submission"),
    }
}

/// 查看某作业的全部提交
pub fn list_submissions(actor: &Actor, course: Option<&CourseAccess>) -> Decision {
    owner_only(
        actor,
        course,
        ASSIGNMENT_NOT_FOUND,
        "Only this course's teacher can view submissions",
    )
}

/// 评分
pub fn grade_submission(actor: &Actor, chain: Option<&SubmissionOwnerChain>) -> Decision {
    match chain {
        None => Decision::not_found(SUBMISSION_NOT_FOUND),
        Some(c) if c.course_teacher_id == actor.id => Decision::Allow,
        Some(_) => Decision::forbidden("Only this course's teacher can grade submissions"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::DenyReason;

    const TEACHER_ID: i64 = 1;
    const OTHER_TEACHER_ID: i64 = 2;
    const STUDENT_ID: i64 = 10;

    fn teacher() -> Actor {
        Actor::new(TEACHER_ID, UserRole::Teacher)
    }

    fn other_teacher() -> Actor {
        Actor::new(OTHER_TEACHER_ID, UserRole::Teacher)
    }

    fn student() -> Actor {
        Actor::new(STUDENT_ID, UserRole::Student)
    }

    fn course(enrolled: bool) -> CourseAccess {
        CourseAccess {
            teacher_id: TEACHER_ID,
            enrolled,
        }
    }

    #[test]
    fn test_create_course_requires_teacher() {
        assert_eq!(create_course(&teacher()), Decision::Allow);
        assert_eq!(
            create_course(&student()).reason(),
            Some(DenyReason::Forbidden)
        );
    }

    #[test]
    fn test_read_course_iff_owner_or_enrolled() {
        // 所有 (是否教师, 是否选课) 组合
        for (actor, enrolled, expected) in [
            (teacher(), false, true),
            (other_teacher(), false, false),
            (other_teacher(), true, true),
            (student(), false, false),
            (student(), true, true),
        ] {
            let facts = course(enrolled);
            let expected_allow = actor.id == facts.teacher_id || facts.enrolled;
            assert_eq!(expected, expected_allow);
            assert_eq!(
                read_course(&actor, Some(&facts)).is_allowed(),
                expected,
                "actor {} enrolled {}",
                actor.id,
                enrolled
            );
            assert_eq!(read_modules(&actor, Some(&facts)).is_allowed(), expected);
            assert_eq!(read_assignment(&actor, Some(&facts)).is_allowed(), expected);
        }
    }

    #[test]
    fn test_missing_resource_is_not_found_for_everyone() {
        for actor in [teacher(), other_teacher(), student()] {
            assert_eq!(
                read_course(&actor, None),
                Decision::not_found(COURSE_NOT_FOUND)
            );
            assert_eq!(
                manage_modules(&actor, None).reason(),
                Some(DenyReason::NotFound)
            );
            assert_eq!(
                read_assignment(&actor, None),
                Decision::not_found(ASSIGNMENT_NOT_FOUND)
            );
            assert_eq!(
                submit(&actor, None),
                Decision::not_found(ASSIGNMENT_NOT_FOUND)
            );
            assert_eq!(
                grade_submission(&actor, None),
                Decision::not_found(SUBMISSION_NOT_FOUND)
            );
            assert_eq!(
                read_own_submission(&actor, None),
                Decision::not_found(SUBMISSION_NOT_FOUND)
            );
        }
    }

    #[test]
    fn test_owner_only_actions() {
        let facts = course(false);
        for rule in [manage_modules, create_assignment, list_enrollments, list_submissions] {
            assert!(rule(&teacher(), Some(&facts)).is_allowed());
            assert_eq!(
                rule(&other_teacher(), Some(&facts)).reason(),
                Some(DenyReason::Forbidden)
            );
            // 选课学生也不能执行教师操作
            assert_eq!(
                rule(&student(), Some(&course(true))).reason(),
                Some(DenyReason::Forbidden)
            );
        }
    }

    #[test]
    fn test_enroll_student() {
        let facts = course(false);
        assert!(enroll_student(&teacher(), Some(&facts), Some(UserRole::Student)).is_allowed());
        assert_eq!(
            enroll_student(&teacher(), Some(&facts), Some(UserRole::Teacher)).reason(),
            Some(DenyReason::Forbidden)
        );
        assert_eq!(
            enroll_student(&teacher(), Some(&facts), None),
            Decision::not_found(STUDENT_NOT_FOUND)
        );
        assert_eq!(
            enroll_student(&other_teacher(), Some(&facts), Some(UserRole::Student)).reason(),
            Some(DenyReason::Forbidden)
        );
        // 非教师即使目标不存在也是 forbidden，不泄露用户是否存在
        assert_eq!(
            enroll_student(&other_teacher(), Some(&facts), None).reason(),
            Some(DenyReason::Forbidden)
        );
        assert_eq!(
            enroll_student(&teacher(), None, Some(UserRole::Student)),
            Decision::not_found(COURSE_NOT_FOUND)
        );
    }

    #[test]
    fn test_submit_requires_enrolled_student() {
        assert!(submit(&student(), Some(&course(true))).is_allowed());
        assert_eq!(
            submit(&student(), Some(&course(false))).reason(),
            Some(DenyReason::Forbidden)
        );
        assert_eq!(
            submit(&teacher(), Some(&course(false))).reason(),
            Some(DenyReason::Forbidden)
        );
        // 教师即使被记录为选课也不能提交
        assert_eq!(
            submit(&other_teacher(), Some(&course(true))).reason(),
            Some(DenyReason::Forbidden)
        );
    }

    #[test]
    fn test_submission_reads_and_grading() {
        let chain = SubmissionOwnerChain {
            student_id: STUDENT_ID,
            course_teacher_id: TEACHER_ID,
        };

        assert!(read_own_submission(&student(), Some(&chain)).is_allowed());
        assert_eq!(
            read_own_submission(&teacher(), Some(&chain)).reason(),
            Some(DenyReason::Forbidden)
        );
        assert_eq!(
            read_own_submission(&Actor::new(11, UserRole::Student), Some(&chain)).reason(),
            Some(DenyReason::Forbidden)
        );

        assert!(grade_submission(&teacher(), Some(&chain)).is_allowed());
        assert_eq!(
            grade_submission(&other_teacher(), Some(&chain)).reason(),
            Some(DenyReason::Forbidden)
        );
        assert_eq!(
            grade_submission(&student(), Some(&chain)).reason(),
            Some(DenyReason::Forbidden)
        );
    }
}
