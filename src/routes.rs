use crate::{
    api::{asistencia, individuos, usuarios},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let api_limiter = build_limiter(config.rate_api_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(api_limiter)
            .service(
                web::scope("/individuos")
                    // /individuos
                    .service(
                        web::resource("")
                            .route(web::post().to(individuos::create_individuo))
                            .route(web::get().to(individuos::list_individuos)),
                    )
                    // /individuos/dni/{dni}
                    .service(
                        web::resource("/dni/{dni}")
                            .route(web::get().to(individuos::get_individuo_by_dni)),
                    )
                    // /individuos/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(individuos::get_individuo))
                            .route(web::put().to(individuos::update_individuo))
                            .route(web::delete().to(individuos::delete_individuo)),
                    ),
            )
            .service(
                web::scope("/usuarios")
                    // /usuarios
                    .service(
                        web::resource("").route(web::post().to(usuarios::register_usuario)),
                    ),
            )
            .service(
                web::scope("/asistencia")
                    // /asistencia
                    .service(
                        web::resource("").route(web::post().to(asistencia::mark_asistencia)),
                    )
                    // /asistencia/activos
                    .service(
                        web::resource("/activos")
                            .route(web::get().to(asistencia::active_usuarios)),
                    )
                    // /asistencia/{usuario_id}
                    .service(
                        web::resource("/{usuario_id}")
                            .route(web::get().to(asistencia::asistencia_for_usuario)),
                    ),
            ),
    );
}
