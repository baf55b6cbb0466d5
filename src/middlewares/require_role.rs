/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，在任何资源查询之前拒绝角色不符的请求。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::{RequireJWT, RequireRole};
 * use crate::models::users::entities::UserRole;
 *
 * web::scope("/api/v1/courses")
 *     .wrap(RequireJWT)  // 先验证JWT
 *     .service(
 *         web::resource("").route(
 *             web::post()
 *                 .to(create_course)
 *                 .wrap(RequireRole::new(UserRole::Teacher)),  // 再验证角色
 *         ),
 *     );
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::{
    middlewares::RequireJWT,
    models::{ErrorCode, users::entities::UserRole},
};

use super::create_error_response;

#[derive(Clone, Copy)]
pub struct RequireRole {
    role: UserRole,
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: UserRole) -> Self {
        Self { role }
    }
}

// 拒绝时说明所需角色
fn role_mismatch_message(required: UserRole) -> String {
    format!("Requires role {}", required.to_string().to_uppercase())
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            role: self.role,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    role: UserRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required = self.role;

        Box::pin(async move {
            match RequireJWT::extract_actor(req.request()) {
                Some(actor) if actor.role == required => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(actor) => {
                    info!(
                        "Access denied for user {} (role: {}). Required role: {}",
                        actor.id, actor.role, required
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            &role_mismatch_message(required),
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: no actor found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Not authenticated",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mismatch_message_names_role() {
        assert_eq!(
            role_mismatch_message(UserRole::Teacher),
            "Requires role TEACHER"
        );
        assert_eq!(
            role_mismatch_message(UserRole::Student),
            "Requires role STUDENT"
        );
    }
}
