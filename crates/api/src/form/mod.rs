mod submit_form;

use actix_web::web;
use submit_form::submit_form_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/submit-form", web::post().to(submit_form_controller));
}
