//! HTTP client for a patch service running as a separate local process.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::error::Error;
use crate::orchestrator::PatchService;
use crate::types::{PatchRequest, PatchResult};

/// Path of the patch endpoint on the service.
pub const UPDATE_PATH: &str = "/update-text";

/// Patch service reached over HTTP.
///
/// Any transport failure is reported as `ServiceUnavailable` so the
/// orchestration stops trying candidates.
#[derive(Debug, Clone)]
pub struct RemoteService {
    /// Service base URL, always ending in `/`, e.g. `http://127.0.0.1:3456/`.
    base: Url,
    /// Blocking client carrying the per-request timeout.
    client: Client,
}

impl RemoteService {
    /// Build a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRequest` if the URL does not parse, or
    /// `Error::ServiceUnavailable` if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let mut base = Url::parse(base_url)
            .map_err(|e| return Error::invalid(format!("bad service URL `{base_url}`: {e}")))?;
        if !base.path().ends_with('/') {
            let prefix = format!("{}/", base.path());
            base.set_path(&prefix);
        }
        let client = Client::builder().timeout(timeout).build().map_err(unavailable)?;
        return Ok(Self { base, client });
    }

    /// Call the health endpoint and return its acknowledgment text.
    ///
    /// # Errors
    ///
    /// Returns `Error::ServiceUnavailable` if the service does not answer with success.
    pub fn ping(&self) -> Result<String, Error> {
        let response = self.client.get(self.base.clone()).send().map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::ServiceUnavailable {
                reason: format!("health check returned {status}"),
            });
        }
        return response.text().map_err(unavailable);
    }

    /// Absolute URL of the patch endpoint, below any path prefix on the base.
    fn update_url(&self) -> Result<Url, Error> {
        return self
            .base
            .join(UPDATE_PATH.trim_start_matches('/'))
            .map_err(|e| return Error::invalid(format!("bad service URL `{}`: {e}", self.base)));
    }
}

impl PatchService for RemoteService {
    fn patch(&self, request: &PatchRequest) -> Result<PatchResult, Error> {
        let url = self.update_url()?;
        let response = self.client.post(url).json(request).send().map_err(unavailable)?;
        let status = response.status();
        // Per-file failures come back as JSON too; anything else means we are
        // not talking to a patch service.
        return response.json::<PatchResult>().map_err(|e| {
            return Error::ServiceUnavailable {
                reason: format!("unexpected response ({status}): {e}"),
            };
        });
    }
}

/// Map a transport error to `ServiceUnavailable`.
fn unavailable(e: reqwest::Error) -> Error {
    let reason = if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("cannot connect, is `livetext serve` running? ({e})")
    } else {
        e.to_string()
    };
    return Error::ServiceUnavailable { reason };
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An address nothing listens on: bind an ephemeral port, then release it.
    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    #[test]
    fn unreachable_service_is_service_unavailable() {
        let service = RemoteService::new(&closed_port_url(), Duration::from_secs(2)).unwrap();
        let request = PatchRequest {
            file_path: "/tmp/page.tsx".to_string(),
            new_text: "b".to_string(),
            old_text: "a".to_string(),
        };
        let err = service.patch(&request).unwrap_err();
        assert!(matches!(err, Error::ServiceUnavailable { .. }));
    }

    #[test]
    fn ping_unreachable_service_fails() {
        let service = RemoteService::new(&closed_port_url(), Duration::from_secs(2)).unwrap();
        assert!(matches!(service.ping(), Err(Error::ServiceUnavailable { .. })));
    }

    #[test]
    fn update_url_is_joined_onto_base() {
        let service = RemoteService::new("http://127.0.0.1:3456", Duration::from_secs(1)).unwrap();
        assert_eq!(service.update_url().unwrap().as_str(), "http://127.0.0.1:3456/update-text");
    }

    #[test]
    fn update_url_keeps_path_prefix() {
        let with_slash = RemoteService::new("http://localhost:8080/livetext/", Duration::from_secs(1)).unwrap();
        assert_eq!(with_slash.update_url().unwrap().as_str(), "http://localhost:8080/livetext/update-text");

        let without_slash = RemoteService::new("http://localhost:8080/livetext", Duration::from_secs(1)).unwrap();
        assert_eq!(without_slash.update_url().unwrap().as_str(), "http://localhost:8080/livetext/update-text");
    }

    #[test]
    fn malformed_base_url_is_invalid_request() {
        let err = RemoteService::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { .. }));
    }
}
