mod telemetry;

use invite_engine_api::Application;
use invite_engine_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("invite_engine".into(), "info".into());
    init_subscriber(subscriber);

    run_migration()
        .await
        .expect("Migrations to run against the configured database");
    info!("Migrations done");

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
