use actix_web::web;

use crate::handlers::blog;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .service(
                web::resource("")
                    .route(web::get().to(blog::post_list))
            )
            .service(
                web::resource("/{slug}")
                    .route(web::get().to(blog::post_detail))
            )
    );
}
