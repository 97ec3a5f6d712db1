//! Headless `commands` mode
//!
//! Resolves the same inputs the panel would (IP, listener status, download
//! base), renders the command templates for one OS and prints them. With
//! `--json` every item is written as one NDJSON line for scripts.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;

use dwnldr_api::ApiClient;
use dwnldr_app::config::{PreferencesStore, Settings};
use dwnldr_core::prelude::*;
use dwnldr_core::{
    clamp_fallback_port, render_commands, DerivedInputs, FileServerStatus, OsTab, RenderedGroup,
};

#[derive(Args, Debug, Clone, Default)]
pub struct CommandsArgs {
    /// Target OS (defaults to the tab saved by the panel)
    #[arg(long, value_name = "OS")]
    pub os: Option<OsTab>,

    /// File name to download
    #[arg(long, value_name = "NAME")]
    pub file: Option<String>,

    /// IP to put in the URL instead of the saved override or detected IP
    #[arg(long)]
    pub ip: Option<String>,

    /// Fallback port used while the file listener is stopped
    #[arg(long, value_name = "PORT")]
    pub port: Option<String>,

    /// Print one JSON object per command
    #[arg(long)]
    pub json: bool,
}

/// One rendered command in `--json` output
#[derive(Debug, Serialize)]
struct CommandLine<'a> {
    os: OsTab,
    group: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    id: &'a str,
    text: &'a str,
}

/// Fetch everything the templates need and print the rendered commands
pub async fn run_commands(settings: Settings, args: CommandsArgs) -> Result<()> {
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    dwnldr_core::logging::init_stderr();

    let api = ApiClient::new(&settings.server.url, settings.request_timeout())?;
    let prefs = PreferencesStore::default_location().load();
    let os = args.os.unwrap_or(prefs.os_tab);

    let (ip, status, files, spec) = tokio::join!(
        resolve_ip(&api, args.ip.clone(), prefs.manual_ip_override.clone()),
        api.listener_status(),
        api.list_files(),
        api.fetch_commands(os),
    );
    let spec = spec?;
    if let Some(error) = &spec.error {
        warn!("Backend served its built-in {} commands: {}", os, error);
    }

    let status = status.unwrap_or_else(|e| {
        debug!("Listener status unavailable ({}), assuming stopped", e);
        FileServerStatus::stopped()
    });

    let mut policy = settings.serving_policy();
    match files {
        Ok(list) => {
            if let Some(base) = list.download_base() {
                policy.set_base_path(&base);
            }
        }
        Err(e) => debug!("File list unavailable: {}", e),
    }

    let inputs = DerivedInputs {
        ip,
        filename: args.file.unwrap_or_default().trim().to_string(),
        fallback_port: args.port.as_deref().and_then(clamp_fallback_port),
    };
    let groups = render_commands(&spec, &policy.template_vars(&inputs, &status));

    let mut stdout = io::stdout().lock();
    if args.json {
        write_json(&mut stdout, os, &groups)?;
    } else {
        write_text(&mut stdout, &groups)?;
    }
    stdout.flush()?;
    Ok(())
}

/// CLI value, else the saved override, else the backend's detected IP
async fn resolve_ip(
    api: &ApiClient,
    cli: Option<String>,
    manual_override: Option<String>,
) -> String {
    if let Some(ip) = cli.or(manual_override) {
        return ip;
    }
    match api.detect_ip().await {
        Ok(Some(ip)) => ip,
        Ok(None) => {
            warn!("Backend could not detect a LAN IP");
            String::new()
        }
        Err(e) => {
            warn!("IP detection failed: {}", e);
            String::new()
        }
    }
}

fn write_text(out: &mut impl Write, groups: &[RenderedGroup]) -> Result<()> {
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        match &group.tag {
            Some(tag) => writeln!(out, "# {} [{}]", group.title, tag)?,
            None => writeln!(out, "# {}", group.title)?,
        }
        for item in &group.items {
            writeln!(out, "{}", item.text)?;
        }
    }
    Ok(())
}

fn write_json(out: &mut impl Write, os: OsTab, groups: &[RenderedGroup]) -> Result<()> {
    for group in groups {
        for item in &group.items {
            let line = CommandLine {
                os,
                group: &group.title,
                tag: group.tag.as_deref(),
                id: &item.id,
                text: &item.text,
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        }
    }
    Ok(())
}
