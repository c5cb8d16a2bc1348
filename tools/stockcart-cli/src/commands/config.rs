//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    for (section, keys) in [
        ("api", ["base_url", "timeout_ms"]),
        ("storage", ["dir", "key"]),
        ("logging", ["level", "format"]),
    ] {
        ctx.output.info("");
        ctx.output.info(&format!("[{}]", section));
        for key in keys {
            let value = ctx.config.get(&format!("{}.{}", section, key))?;
            ctx.output.kv(key, &value);
        }
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = ctx.config.get(key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = ctx.config_path.clone().or_else(|| existing_config_file(ctx)) else {
        bail!("No config file found. Run `stockcart config init` to create one.");
    };

    // Reload without environment overrides so they are not persisted.
    let mut config = CliConfig::load(&path)?;
    config.set(key, value)?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let errors = ctx.config.validate();

    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    bail!("Configuration has {} error(s)", errors.len())
}

fn existing_config_file(ctx: &Context) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| ctx.cwd.join(name))
        .find(|path| path.is_file())
}
