use crate::{
    api::{attendance, employee, payroll},
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

    // Employee master data lives at the root, where the frontend expects it
    cfg.service(
        web::scope("/employees")
            .service(
                web::resource("")
                    .route(web::post().to(employee::create_employee))
                    .route(web::get().to(employee::list_employees)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_api_per_min))
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("").route(web::post().to(attendance::create_attendance)),
                    )
                    .service(
                        web::resource("/list/{employee_id}/{year}/{month}")
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    .service(
                        web::resource("/summary/{employee_id}/{year}/{month}")
                            .route(web::get().to(attendance::attendance_summary)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::delete().to(attendance::delete_attendance)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    .service(
                        web::resource("/settings").route(web::post().to(payroll::save_settings)),
                    )
                    .service(
                        web::resource("/settings/latest")
                            .route(web::get().to(payroll::latest_settings)),
                    )
                    .service(
                        web::resource("/calculate")
                            .route(web::post().to(payroll::calculate_payroll)),
                    )
                    .service(web::resource("/save").route(web::post().to(payroll::save_record)))
                    .service(web::resource("/records").route(web::get().to(payroll::list_records)))
                    .service(
                        // batch runs hit every employee row; keep the rate low
                        web::resource("/generate")
                            .wrap(build_limiter(config.rate_generate_per_min))
                            .route(web::post().to(payroll::generate_payroll)),
                    ),
            ),
    );
}
