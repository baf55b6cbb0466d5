pub mod assignments;

pub mod auth;

pub mod courses;

pub mod health;

pub mod me;

pub mod submissions;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use health::configure_health_routes;
pub use me::configure_me_routes;
pub use submissions::configure_submissions_routes;

use actix_web::web;

// 注册全部 API 路由
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_auth_routes)
        .configure(configure_me_routes)
        .configure(configure_courses_routes)
        .configure(configure_assignments_routes)
        .configure(configure_submissions_routes);
}

#[cfg(test)]
mod tests;
