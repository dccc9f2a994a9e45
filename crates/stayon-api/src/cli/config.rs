//! `stayon config`: print the effective configuration, and optionally
//! check that the configured provider answers.

use std::path::Path;

use anyhow::Result;
use console::style;

use stayon_infra::config::resolve_api_key;
use stayon_infra::llm::{create_provider, test_provider_connection};
use stayon_types::config::GlobalConfig;

pub async fn show_config(
    config: &GlobalConfig,
    data_dir: &Path,
    history_dir: &Path,
    check: bool,
    json: bool,
) -> Result<()> {
    let api_key_set = resolve_api_key(&config.llm).is_some();
    let connection = if check {
        Some(check_connection(config).await)
    } else {
        None
    };

    if json {
        let value = serde_json::json!({
            "data_dir": data_dir,
            "history_dir": history_dir,
            "api_key_set": api_key_set,
            "connection": connection.as_ref().map(|result| match result {
                Ok(()) => serde_json::json!({ "ok": true }),
                Err(message) => serde_json::json!({ "ok": false, "message": message }),
            }),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("✓").green())
        } else {
            format!("{}", style("✗").red())
        }
    };

    println!();
    println!("  Data dir:    {}", style(data_dir.display()).cyan());
    println!("  History dir: {}", style(history_dir.display()).cyan());
    println!(
        "  {} API key in ${}",
        check_mark(api_key_set),
        config.llm.api_key_env
    );
    match &connection {
        Some(Ok(())) => println!(
            "  {} Connected to {} ({})",
            check_mark(true),
            style(&config.llm.provider).cyan(),
            config.llm.model
        ),
        Some(Err(message)) => println!(
            "  {} Connection test failed: {}",
            check_mark(false),
            message
        ),
        None => {}
    }
    println!();
    for line in toml::to_string_pretty(config)?.lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}

/// Build the configured provider and send it one short request.
async fn check_connection(config: &GlobalConfig) -> Result<(), String> {
    let api_key = resolve_api_key(&config.llm)
        .ok_or_else(|| format!("no API key in ${}", config.llm.api_key_env))?;
    let provider = create_provider(&config.llm, api_key).map_err(|e| e.to_string())?;
    test_provider_connection(&provider)
        .await
        .map_err(|e| e.to_string())?;
    tracing::debug!(provider = provider.name(), "Provider connection verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stayon_types::config::LlmSettings;

    #[tokio::test]
    async fn check_without_key_reports_the_variable() {
        let config = GlobalConfig {
            llm: LlmSettings {
                api_key_env: "STAYON_CONFIG_CHECK_UNSET_KEY".to_string(),
                ..LlmSettings::default()
            },
            ..GlobalConfig::default()
        };
        let err = check_connection(&config).await.unwrap_err();
        assert!(err.contains("STAYON_CONFIG_CHECK_UNSET_KEY"));
    }

    #[tokio::test]
    async fn check_rejects_empty_model_before_any_request() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("STAYON_CONFIG_CHECK_EMPTY_MODEL_KEY", "sk-test") };
        let config = GlobalConfig {
            llm: LlmSettings {
                api_key_env: "STAYON_CONFIG_CHECK_EMPTY_MODEL_KEY".to_string(),
                model: String::new(),
                ..LlmSettings::default()
            },
            ..GlobalConfig::default()
        };
        let err = check_connection(&config).await.unwrap_err();
        assert!(err.contains("llm.model is empty"), "{err}");
    }
}
