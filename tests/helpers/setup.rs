use invite_engine_api::Application;
use invite_engine_infra::{Config, InMemoryMailer, InviteContext};
use invite_engine_sdk::InviteEngineSDK;
use std::sync::Arc;

pub struct TestApp {
    pub config: Config,
    pub mailer: Arc<InMemoryMailer>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, InviteEngineSDK, String) {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with<F>(configure: F) -> (TestApp, InviteEngineSDK, String)
where
    F: FnOnce(&mut InviteContext),
{
    let mut ctx = InviteContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.require_access_token = false;
    let mailer = Arc::new(InMemoryMailer::new());
    ctx.mailer = mailer.clone();
    configure(&mut ctx);

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config, mailer };
    let sdk = InviteEngineSDK::new(address.clone());
    (app, sdk, address)
}
