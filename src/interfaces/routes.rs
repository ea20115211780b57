use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod blog;
mod json_error;
mod projects;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.configure(blog::config_routes)
        .configure(projects::config_routes)
        .configure(admin::config_routes);

    cfg.configure(json_error::config_routes);
}
