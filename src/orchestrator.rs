//! Trial orchestration: try each candidate file in order until one takes the edit.

use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind};
use crate::patcher;
use crate::resolver;
use crate::types::{EditRequest, PatchRequest, PatchResult, Saved, display_name};

/// Something that can apply one patch: the in-process engine or a remote service.
///
/// `Ok` means the engine answered, whatever it answered. `Err` means the
/// engine could not be reached at all.
pub trait PatchService {
    /// Apply one patch and report the engine's verdict.
    ///
    /// # Errors
    ///
    /// Returns `Error::ServiceUnavailable` when the engine cannot be reached.
    fn patch(&self, request: &PatchRequest) -> Result<PatchResult, Error>;
}

/// Runs the patch engine in this process.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalService;

impl PatchService for LocalService {
    fn patch(&self, request: &PatchRequest) -> Result<PatchResult, Error> {
        let outcome = patcher::patch(Path::new(&request.file_path), &request.old_text, &request.new_text);
        return Ok(PatchResult::from(&outcome));
    }
}

/// Build the ordered candidate list: explicit hint first, then resolver guesses.
pub fn candidates(request: &EditRequest) -> Vec<PathBuf> {
    let mut list = Vec::new();
    if let Some(file) = non_blank(request.explicit_file.as_deref()) {
        list.push(file.to_path_buf());
    }
    if let Some(root) = non_blank(request.project_root.as_deref()) {
        list.extend(resolver::resolve(&request.page_url_path, root));
    }
    return list;
}

/// Save one edit: validate it, then patch candidates in order until one succeeds.
///
/// # Errors
///
/// Returns `Error::InvalidRequest` if the request breaks its invariants, or any
/// error from [`try_candidates`].
pub fn try_save<S: PatchService + ?Sized>(request: &EditRequest, service: &S) -> Result<Saved, Error> {
    request.validate()?;
    let list = candidates(request);
    return try_candidates(list, &request.old_text, &request.new_text, service);
}

/// Patch each candidate in order, stopping at the first success.
///
/// Per-file failures move on to the next candidate. A service that cannot be
/// reached ends the trial at once, since no later candidate can fare better.
///
/// # Errors
///
/// Returns `Error::ServiceUnavailable` if the service cannot be reached,
/// `Error::InvalidRequest` if the service rejects the request outright,
/// or `Error::TextNotFoundAnywhere` naming every attempted candidate.
pub fn try_candidates<S: PatchService + ?Sized>(
    list: Vec<PathBuf>,
    old_text: &str,
    new_text: &str,
    service: &S,
) -> Result<Saved, Error> {
    let mut tried = Vec::with_capacity(list.len());

    for candidate in list {
        let name = display_name(&candidate);
        tracing::debug!(candidate = %candidate.display(), "attempting");

        let body = PatchRequest {
            file_path: candidate.to_string_lossy().into_owned(),
            new_text: new_text.to_string(),
            old_text: old_text.to_string(),
        };
        let result = service.patch(&body).inspect_err(|e| {
            tracing::warn!(error = %e, "patch service unreachable, aborting");
        })?;

        if result.success {
            tracing::info!(file = %candidate.display(), line = ?result.line_number, "saved");
            return Ok(Saved {
                file: candidate,
                file_name: result.file_name.unwrap_or(name),
                line_number: result.line_number,
            });
        }

        if let Some(kind) = result.error_kind.filter(|kind| return !kind.is_per_candidate()) {
            return Err(abort_error(kind, result.error));
        }

        tracing::debug!(
            candidate = %name,
            error = result.error.as_deref().unwrap_or("unknown error"),
            "candidate failed"
        );
        tried.push(name);
    }

    return Err(Error::TextNotFoundAnywhere { tried });
}

/// Turn a non-recoverable failure reported by the service back into an error.
fn abort_error(kind: ErrorKind, message: Option<String>) -> Error {
    let reason = message.unwrap_or_else(|| return format!("{kind:?}"));
    return match kind {
        ErrorKind::ServiceUnavailable => Error::ServiceUnavailable { reason },
        _ => Error::InvalidRequest { reason },
    };
}

/// The path, unless it is unset or blank.
fn non_blank(path: Option<&Path>) -> Option<&Path> {
    return path.filter(|p| return !p.as_os_str().to_string_lossy().trim().is_empty());
}
