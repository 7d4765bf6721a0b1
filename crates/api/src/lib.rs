mod error;
mod event;
mod form;
mod shared;
mod status;
mod token;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use invite_engine_infra::{Config, InviteContext};
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use event::reconcile_event::{ReconcileEventUseCase, ReconcileOutcome, SkipReason};

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    event::configure_routes(cfg);
    form::configure_routes(cfg);
    status::configure_routes(cfg);
    token::configure_routes(cfg);
}

fn cors(config: &Config) -> Cors {
    match &config.cors_allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_header(actix_web::http::header::CONTENT_TYPE)
            .max_age(3600),
        None => Cors::permissive(),
    }
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: InviteContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context).await?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: InviteContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        info!("Invite engine listening on port: {}", port);

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(cors(&ctx.config))
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
