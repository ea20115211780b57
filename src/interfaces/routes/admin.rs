use actix_web::web;

use crate::handlers::{admin, auth, system::admin_health_check};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(auth::login)
            .service(admin_health_check)
            .service(
                web::resource("/posts")
                    .route(web::get().to(admin::list_posts))
                    .route(web::post().to(admin::create_post))
            )
            .service(
                web::resource("/posts/{post_id}")
                    .route(web::get().to(admin::get_post))
                    .route(web::patch().to(admin::update_post))
                    .route(web::delete().to(admin::delete_post))
            )
            .service(
                web::resource("/projects")
                    .route(web::get().to(admin::list_projects))
                    .route(web::post().to(admin::create_project))
            )
            .service(
                web::resource("/projects/{project_id}")
                    .route(web::get().to(admin::get_project))
                    .route(web::patch().to(admin::update_project))
                    .route(web::delete().to(admin::delete_project))
            )
            .service(
                web::resource("/markdown/preview")
                    .route(web::post().to(admin::preview_markdown))
            )
    );
}
