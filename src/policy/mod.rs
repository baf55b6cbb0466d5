//! 访问策略
//!
//! 对 (actor, resource, action) 三元组给出允许或拒绝的决定。
//!
//! - `rules`：纯函数规则，只依赖传入的事实
//! - `facts`：规则所需的只读事实，以及提供事实的 [`AccessFacts`] trait
//! - `evaluator`：[`AccessPolicy`]，先解析事实再应用规则
//!
//! 策略不缓存任何结果，每次评估都基于当时从存储读取的事实。

mod decision;
mod evaluator;
mod facts;
pub mod rules;

pub use decision::{Actor, Decision, DenyReason};
pub use evaluator::AccessPolicy;
pub use facts::{AccessFacts, CourseAccess, SubmissionOwnerChain};
