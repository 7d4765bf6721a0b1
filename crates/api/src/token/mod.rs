mod generate_token;

use actix_web::web;
use generate_token::generate_token_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/tokens", web::get().to(generate_token_controller));
    cfg.route("/tokens", web::post().to(generate_token_controller));
}
