// Route exports
pub mod errors;
pub mod generate;
pub mod matches;

pub use errors::{handle_json_payload_error, handle_query_payload_error, ApiError};
pub use matches::AppState;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(matches::root)).service(
        web::scope("/api")
            .configure(matches::configure)
            .configure(generate::configure),
    );
}
