//! HTTP GET via the curl crate (libcurl).

use std::time::Duration;

use super::HttpClient;
use crate::error::FetchError;

/// Blocking libcurl client. Runs in the current thread; call from
/// `spawn_blocking` if used from async code.
#[derive(Debug, Clone, Copy)]
pub struct CurlClient {
    connect_timeout: Duration,
}

impl Default for CurlClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl CurlClient {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl HttpClient for CurlClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let curl_err = |e: curl::Error| FetchError::Http {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let mut body = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_err)?;
        easy.get(true).map_err(curl_err)?;
        easy.follow_location(true).map_err(curl_err)?;
        easy.max_redirections(10).map_err(curl_err)?;
        easy.connect_timeout(self.connect_timeout).map_err(curl_err)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(curl_err)?;
            transfer.perform().map_err(curl_err)?;
        }

        let code = easy.response_code().map_err(curl_err)?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Status {
                url: url.to_string(),
                code,
            });
        }
        tracing::debug!(url, bytes = body.len(), "GET complete");
        Ok(body)
    }
}
