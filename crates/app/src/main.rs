mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "finance_bot={level},telegram_bot={level},engine={level}",
            level = settings.log_level
        ))
        .init();

    let mut builder = telegram_bot::Bot::builder()
        .token(&settings.bot_token)
        .owner(settings.owner_id)
        .allowed_users(settings.allowed_ids.clone())
        .script(&settings.script_url, settings.script_timeout)
        .timezone(settings.timezone);
    if let Some(webhook) = &settings.webhook {
        tracing::info!(url = %webhook.url, port = webhook.port, "Found webhook settings...");
        builder = builder.webhook(&webhook.url, webhook.path.as_deref(), webhook.port);
    }

    let bot = match builder.build() {
        Ok(bot) => bot,
        Err(err) => {
            tracing::error!("failed to initialize telegram bot: {err}");
            return Err(err.into());
        }
    };
    if let Err(err) = bot.run().await {
        tracing::error!("telegram bot stopped: {err}");
        return Err(err.into());
    }

    Ok(())
}
