use actix_web::web;

pub mod games;
pub mod health;
pub mod stories;

/// Configure application routes for the server and for tests.
///
/// Tests register the same paths as `main.rs` so endpoint behavior can be
/// exercised through `actix_web::test` without a running server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/health").configure(health::configure_routes));
    cfg.service(
        web::scope("/api/games")
            .configure(games::configure_routes)
            .configure(stories::configure_routes),
    );
}
