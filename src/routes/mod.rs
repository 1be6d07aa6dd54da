pub mod classes;

pub mod home;

pub mod modules;

pub mod students;

pub mod teachers;

pub use classes::configure_classes_routes;
pub use home::configure_home_routes;
pub use modules::configure_modules_routes;
pub use students::configure_students_routes;
pub use teachers::configure_teachers_routes;

use actix_web::web;

// 配置全部路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_home_routes)
        .configure(configure_teachers_routes)
        .configure(configure_classes_routes)
        .configure(configure_modules_routes)
        .configure(configure_students_routes);
}
