use serde::Serialize;
use std::fmt;

use crate::errors::{LmsError, Result};
use crate::models::users::entities::{User, UserRole};

/// 已认证的请求主体，在单个请求内不可变
///
/// 由 `RequireJWT` 写入请求扩展，处理函数通过提取器显式获取。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub id: i64,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: i64, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}

/// 拒绝原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    NotFound,
    Forbidden,
    Unauthenticated,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::NotFound => write!(f, "not_found"),
            DenyReason::Forbidden => write!(f, "forbidden"),
            DenyReason::Unauthenticated => write!(f, "unauthenticated"),
        }
    }
}

impl DenyReason {
    /// 映射到错误类型，供请求层转换为 HTTP 响应
    pub fn into_error(self, message: &str) -> LmsError {
        match self {
            DenyReason::NotFound => LmsError::not_found(message),
            DenyReason::Forbidden => LmsError::forbidden(message),
            DenyReason::Unauthenticated => LmsError::authentication(message),
        }
    }
}

/// 一次策略评估的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny {
        reason: DenyReason,
        message: &'static str,
    },
}

impl Decision {
    pub fn not_found(message: &'static str) -> Self {
        Decision::Deny {
            reason: DenyReason::NotFound,
            message,
        }
    }

    pub fn forbidden(message: &'static str) -> Self {
        Decision::Deny {
            reason: DenyReason::Forbidden,
            message,
        }
    }

    pub fn unauthenticated() -> Self {
        Decision::Deny {
            reason: DenyReason::Unauthenticated,
            message: "Not authenticated",
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny { reason, .. } => Some(*reason),
        }
    }

    /// 转换为错误，供请求层直接用 `?` 传播
    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny { reason, message } => Err(reason.into_error(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_maps_to_error_kind() {
        assert_eq!(
            Decision::not_found("Course not found").into_result(),
            Err(LmsError::not_found("Course not found"))
        );
        assert_eq!(
            Decision::forbidden("Forbidden").into_result(),
            Err(LmsError::forbidden("Forbidden"))
        );
        assert!(matches!(
            Decision::unauthenticated().into_result(),
            Err(LmsError::Authentication(_))
        ));
        assert_eq!(Decision::Allow.into_result(), Ok(()));
    }

    #[test]
    fn test_reason() {
        assert_eq!(Decision::Allow.reason(), None);
        assert_eq!(
            Decision::forbidden("x").reason(),
            Some(DenyReason::Forbidden)
        );
        assert_eq!(DenyReason::NotFound.to_string(), "not_found");
    }
}
