//! HTTP inbound adapter exposing REST endpoints.

pub mod categories;
pub mod error;
pub mod health;
pub mod items;
pub mod lists;
pub mod schemas;
pub mod state;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the list, item and category endpoints.
///
/// JSON body errors are mapped onto the `invalid_request` envelope. Health
/// probes are registered separately because they need their own state.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use marketplace::inbound::http::{configure, state::HttpState};
///
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::fixture()))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(lists::create_list)
        .service(lists::get_lists)
        .service(lists::get_list)
        .service(items::search_items)
        .service(categories::list_categories);
}
