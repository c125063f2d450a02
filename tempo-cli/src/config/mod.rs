//! Credential configuration
//!
//! Values come from a JSON config file, the environment, and finally
//! interactive prompts, in ascending order of precedence. Prompting
//! only happens on a terminal; otherwise missing values are an error
//! that names what to set.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dialoguer::Input;
use is_terminal::IsTerminal;
use serde::Deserialize;

/// Values read from the config file. Every field is optional; missing
/// ones are resolved from the environment or by prompting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserConfig {
    pub jira_endpoint: Option<String>,
    pub jira_email: Option<String>,
    pub jira_api_key: Option<String>,
    pub tempo_access_token: Option<String>,
}

/// Fully resolved credentials for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub jira_endpoint: String,
    pub jira_email: String,
    pub jira_api_key: String,
    pub tempo_access_token: String,
}

/// Load the config file. An explicit path must exist; the default path
/// is optional and silently skipped when absent.
pub fn load_user_config(path: Option<&Path>) -> Result<UserConfig> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(UserConfig::default()),
        },
    };

    let json = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tempo-cli").join("config.json"))
}

/// Resolve every credential, prompting for whatever is still missing
pub fn resolve(config: UserConfig) -> Result<RunConfig> {
    let config = overlay_env(config, |key| env::var(key).ok());

    let jira_endpoint =
        accept(config.jira_endpoint, is_valid_endpoint).map(|v| normalize_endpoint(&v));
    let jira_email = accept(config.jira_email, is_valid_email);
    let jira_api_key = accept(config.jira_api_key, is_present);
    let tempo_access_token = accept(config.tempo_access_token, is_present);

    let missing: Vec<&str> = [
        jira_endpoint.is_none().then_some("jiraEndpoint"),
        jira_email.is_none().then_some("jiraEmail"),
        jira_api_key.is_none().then_some("jiraApiKey"),
        tempo_access_token.is_none().then_some("tempoAccessToken"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !missing.is_empty() && !std::io::stdin().is_terminal() {
        bail!(
            "Missing configuration values ({}); pass --config or set \
             JIRA_ENDPOINT, JIRA_EMAIL, JIRA_API_KEY and TEMPO_ACCESS_TOKEN",
            missing.join(", ")
        );
    }

    Ok(RunConfig {
        jira_endpoint: match jira_endpoint {
            Some(value) => value,
            None => prompt_endpoint()?,
        },
        jira_email: match jira_email {
            Some(value) => value,
            None => prompt_email()?,
        },
        jira_api_key: match jira_api_key {
            Some(value) => value,
            None => prompt_secret("Jira API token")?,
        },
        tempo_access_token: match tempo_access_token {
            Some(value) => value,
            None => prompt_secret("Tempo access token")?,
        },
    })
}

/// Resolve only the Tempo token, for commands that never touch Jira
pub fn resolve_tempo_token(config: UserConfig) -> Result<String> {
    let config = overlay_env(config, |key| env::var(key).ok());
    match accept(config.tempo_access_token, is_present) {
        Some(token) => Ok(token),
        None if std::io::stdin().is_terminal() => prompt_secret("Tempo access token"),
        None => bail!("Missing configuration value tempoAccessToken; pass --config or set TEMPO_ACCESS_TOKEN"),
    }
}

/// Environment variables win over file values
fn overlay_env(config: UserConfig, lookup: impl Fn(&str) -> Option<String>) -> UserConfig {
    let pick = |current: Option<String>, key: &str| {
        lookup(key).filter(|v| !v.trim().is_empty()).or(current)
    };
    UserConfig {
        jira_endpoint: pick(config.jira_endpoint, "JIRA_ENDPOINT"),
        jira_email: pick(config.jira_email, "JIRA_EMAIL"),
        jira_api_key: pick(config.jira_api_key, "JIRA_API_KEY"),
        tempo_access_token: pick(config.tempo_access_token, "TEMPO_ACCESS_TOKEN"),
    }
}

/// Trim a configured value, dropping it when invalid so the prompt
/// fallback kicks in
fn accept(value: Option<String>, is_valid: impl Fn(&str) -> bool) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| is_valid(v))
}

fn is_present(value: &str) -> bool {
    !value.is_empty()
}

fn is_valid_endpoint(value: &str) -> bool {
    value.len() > "https://".len() && value.starts_with("https://")
}

fn is_valid_email(value: &str) -> bool {
    value.contains('@')
}

fn normalize_endpoint(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

fn prompt_endpoint() -> Result<String> {
    let value: String = Input::new()
        .with_prompt("Jira endpoint (e.g. https://mytenant.atlassian.net)")
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_endpoint(input.trim()) {
                Ok(())
            } else {
                Err("the endpoint must start with https://")
            }
        })
        .interact_text()?;
    Ok(normalize_endpoint(&value))
}

fn prompt_email() -> Result<String> {
    let value: String = Input::new()
        .with_prompt("Jira account email")
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_email(input.trim()) {
                Ok(())
            } else {
                Err("that does not look like an email address")
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn prompt_secret(label: &str) -> Result<String> {
    loop {
        let value = rpassword::prompt_password(format!("{}: ", label))?;
        let value = value.trim().to_string();
        if !value.is_empty() {
            return Ok(value);
        }
        eprintln!("A value is required");
    }
}
