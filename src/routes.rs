use crate::{api::report, config::Config};
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

    let report_limiter = build_limiter(config.rate_report_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(report_limiter) // rate limiting
            .service(
                web::scope("/v1/report")
                    // /report
                    .service(web::resource("").route(web::get().to(report::report)))
                    // /report/export
                    .service(web::resource("/export").route(web::get().to(report::export_csv)))
                    // /report/summary
                    .service(web::resource("/summary").route(web::get().to(report::summary))),
            ),
    );
}
