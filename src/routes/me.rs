use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::AuthService;

static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn get_me(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

pub fn configure_me_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/me")
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(get_me)),
    );
}
