//! Import-manifest generation for applications that already exist on the
//! server side.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::debug;

use eaa_client::types::AppType;

use crate::commands::connect;
use crate::error::{CliError, CliResult};
use crate::GlobalArgs;

#[derive(Args)]
pub struct ImportArgs {
    /// Comma-separated application name patterns; `*` wildcards match a
    /// prefix (`app*`), suffix (`*app`), substring (`*app*`) or two
    /// parts (`ex*app`)
    #[arg(long)]
    pub patterns: String,

    /// Manifest file to write
    #[arg(long, default_value = "import_existing_apps.yaml")]
    pub output: PathBuf,
}

#[derive(Debug, Serialize)]
struct ImportManifest {
    provider: ProviderStanza,
    imports: Vec<ImportEntry>,
}

#[derive(Debug, Serialize)]
struct ProviderStanza {
    contractid: String,
    edgerc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    accountswitchkey: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImportEntry {
    resource: String,
    id: String,
    name: String,
}

pub async fn execute(global: &GlobalArgs, args: ImportArgs) -> CliResult<()> {
    let client = connect(global)?;
    let applications = client.list_applications().await?;

    let patterns: Vec<String> = args
        .patterns
        .to_lowercase()
        .split(',')
        .map(|pattern| pattern.trim().to_string())
        .filter(|pattern| !pattern.is_empty())
        .collect();

    let mut imports = Vec::new();
    for model in &applications {
        let app = &model.application;
        if app.name.is_empty() || app.uuid_url.is_empty() {
            continue;
        }
        // Only enterprise and tunnel applications are importable.
        if app.app_type != AppType::Enterprise.code() && app.app_type != AppType::Tunnel.code() {
            debug!(name = %app.name, app_type = app.app_type, "skipping non-importable app type");
            continue;
        }
        let lowered = app.name.to_lowercase();
        if patterns.iter().any(|pattern| matches_pattern(&lowered, pattern)) {
            let resource_name = app.name.replace(' ', "_");
            imports.push(ImportEntry {
                resource: format!("eaa_application.{resource_name}"),
                id: app.uuid_url.clone(),
                name: app.name.clone(),
            });
        }
    }

    let count = imports.len();
    let manifest = ImportManifest {
        provider: ProviderStanza {
            contractid: global.contract_id.clone(),
            edgerc: global.edgerc.display().to_string(),
            accountswitchkey: global.account_switch_key.clone(),
        },
        imports,
    };

    let yaml = serde_yaml::to_string(&manifest).map_err(|e| CliError::Io(e.to_string()))?;
    std::fs::write(&args.output, yaml).map_err(|e| CliError::Io(e.to_string()))?;

    println!("Wrote {count} import entries to {}", args.output.display());
    Ok(())
}

/// Wildcard name matching: `*` alone matches everything; a leading,
/// trailing, surrounding or interior `*` matches suffix, prefix,
/// substring or two-part patterns. Anything else is an exact match.
fn matches_pattern(name: &str, pattern: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(inner) = pattern
        .strip_prefix('*')
        .and_then(|rest| rest.strip_suffix('*'))
    {
        return name.contains(inner);
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return name.ends_with(suffix);
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return name.starts_with(prefix);
    }
    if let Some((prefix, suffix)) = pattern.split_once('*') {
        return name.starts_with(prefix) && name.ends_with(suffix);
    }
    name == pattern
}
