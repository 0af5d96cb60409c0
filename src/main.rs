use miles_intake::configuration::get_configuration;
use miles_intake::startup::Application;
use miles_intake::telemetry::{get_subscriber, init_subscriber};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("miles_intake".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build_from_settings(&configuration).await?;
    application.server.launch().await?;
    Ok(())
}
