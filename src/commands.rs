//! Core CLI commands for livetext: resolve, patch, save, serve, ping.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::client::RemoteService;
use crate::config::{Config, Settings};
use crate::error::Error;
use crate::orchestrator::{self, LocalService};
use crate::patcher;
use crate::resolver;
use crate::server;
use crate::types::{EditRequest, PatchResult};

/// Per-invocation values that take precedence over `.livetext.toml`.
#[derive(Debug, Default)]
pub struct Overrides {
    /// `--file`: explicit file tried first.
    pub file: Option<PathBuf>,
    /// `--root`: project root for the resolver.
    pub root: Option<PathBuf>,
    /// `--server`: send patches to this service.
    pub server: Option<String>,
}

impl Overrides {
    /// Fold the overrides into the loaded settings.
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(root) = &self.root {
            settings.project_root = Some(root.clone());
        }
        if let Some(file) = &self.file {
            settings.explicit_file = Some(file.clone());
        }
        return settings;
    }
}

/// Print the candidate files for a page, one per line, in trial order.
///
/// # Errors
///
/// Returns `Error::InvalidRequest` if no project root is known or the page URL
/// is malformed, or config loading errors.
pub fn resolve(page: &str, root: Option<&Path>) -> Result<(), Error> {
    let config = Config::load(Path::new("."))?;
    let Some(root) = root.map(Path::to_path_buf).or(config.settings.project_root) else {
        return Err(Error::invalid("no project root: pass --root or set project_root in .livetext.toml"));
    };

    let page_path = resolver::page_path(page)?;
    for candidate in resolver::resolve(&page_path, &root) {
        println!("{}", candidate.display());
    }
    return Ok(());
}

/// Patch one file directly with the engine.
///
/// # Errors
///
/// Returns the engine's error when not printing JSON.
pub fn patch(file: &Path, old_text: &str, new_text: &str, json: bool) -> Result<ExitCode, Error> {
    let outcome = patcher::patch(file, old_text, new_text);
    return report(&PatchResult::from(&outcome), outcome.map(drop), json);
}

/// Save an edit made on `page`.
///
/// Tries the explicit file, then every resolver candidate, through the
/// in-process engine or the configured service. With `--json`, a bad service
/// URL is reported on stdout like any other failed save.
///
/// # Errors
///
/// Returns `Error::InvalidRequest` when edit mode is off or the page URL is
/// malformed, plus any orchestration error when not printing JSON.
pub fn save(
    page: &str,
    old_text: &str,
    new_text: &str,
    overrides: &Overrides,
    json: bool,
) -> Result<ExitCode, Error> {
    let config = Config::load(Path::new("."))?;
    let settings = overrides.apply(config.settings);
    if !settings.edit_mode {
        return Err(Error::invalid("edit mode is off (edit_mode = false in .livetext.toml)"));
    }

    let request = EditRequest {
        explicit_file: settings.explicit_file,
        new_text: new_text.to_string(),
        old_text: old_text.to_string(),
        page_url_path: resolver::page_path(page)?,
        project_root: settings.project_root,
    };

    let server_url = overrides.server.as_deref().or(config.service.url.as_deref());
    let outcome = server_url.map_or_else(
        || return orchestrator::try_save(&request, &LocalService),
        |url| {
            let remote = RemoteService::new(url, config.service.timeout())?;
            return orchestrator::try_save(&request, &remote);
        },
    );
    return report(&PatchResult::from(&outcome), outcome.map(drop), json);
}

/// Run the HTTP patch service on a single-threaded runtime until Ctrl+C.
///
/// # Errors
///
/// Returns `Error::Bind` if the address is taken, or `Error::Io` if the
/// runtime cannot start or the server loop fails.
pub fn serve(bind: Option<&str>) -> Result<(), Error> {
    let config = Config::load(Path::new("."))?;
    let bind = bind.unwrap_or(config.service.bind.as_str());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| {
            return Error::Io {
                name: "runtime".to_string(),
                source,
            };
        })?;
    return runtime.block_on(server::run(bind));
}

/// Call the service's health endpoint and print its answer.
///
/// # Errors
///
/// Returns `Error::ServiceUnavailable` if the service does not answer.
pub fn ping(server: Option<&str>) -> Result<(), Error> {
    let config = Config::load(Path::new("."))?;
    let default_url = format!("http://{}", config.service.bind);
    let url = server.or(config.service.url.as_deref()).unwrap_or(default_url.as_str());

    let remote = RemoteService::new(url, config.service.timeout())?;
    let ack = remote.ping()?;
    println!("{ack}");
    return Ok(());
}

/// Print the outcome of a patch or save.
///
/// JSON on stdout with `--json`, otherwise a one-line summary on success and
/// the error handed back for a diagnostic on failure.
fn report(result: &PatchResult, outcome: Result<(), Error>, json: bool) -> Result<ExitCode, Error> {
    let code = if result.success { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    if json {
        let body = serde_json::to_string(result).map_err(|e| {
            return Error::Io {
                name: "stdout".to_string(),
                source: std::io::Error::other(e),
            };
        })?;
        println!("{body}");
        return Ok(code);
    }

    outcome?;
    println!("{}", result.summary());
    return Ok(code);
}
