mod get_event;
pub mod reconcile_event;

use actix_web::web;
use get_event::get_event_controller;
use reconcile_event::reconcile_event_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/events/reconcile",
        web::post().to(reconcile_event_controller),
    );
    cfg.route("/events/{event_id}", web::get().to(get_event_controller));
}
