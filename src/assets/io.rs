use std::path::{Path, PathBuf};

use crate::errors::{Result, ShowroomError};

/// Where a packaged scene comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    File(PathBuf),
    Http(String),
}

impl AssetSource {
    /// Picks HTTP for `http://` / `https://` locations and the filesystem otherwise.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Http(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    /// Human-readable location, for logs and error messages.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Http(url) => url.clone(),
        }
    }

    /// Fetches the raw bytes of the asset, blocking the caller.
    ///
    /// Not available for HTTP on wasm32, where only [`fetch`](Self::fetch) works.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::File(path) => read_file(path),
            Self::Http(url) => fetch_http(url),
        }
    }

    /// Fetches the raw bytes without blocking and hands them to `on_done`.
    ///
    /// HTTP locations go through the async `ehttp` fetch on every target.
    /// In a browser there is no filesystem, so a file path is requested as a
    /// URL relative to the page instead.
    pub fn fetch(&self, on_done: impl FnOnce(Result<Vec<u8>>) + Send + 'static) {
        match self {
            #[cfg(not(target_arch = "wasm32"))]
            Self::File(path) => on_done(read_file(path)),
            #[cfg(target_arch = "wasm32")]
            Self::File(path) => fetch_url(&path.to_string_lossy(), on_done),
            Self::Http(url) => fetch_url(url, on_done),
        }
    }
}

/// Fails with [`ShowroomError::AssetNotFound`] when `path` does not exist.
pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ShowroomError::AssetNotFound(path.display().to_string()))
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    ensure_exists(path)?;
    Ok(std::fs::read(path)?)
}

#[cfg(feature = "http")]
fn response_bytes(response: std::result::Result<ehttp::Response, String>) -> Result<Vec<u8>> {
    let response = response.map_err(ShowroomError::HttpError)?;
    if !response.ok {
        return Err(ShowroomError::HttpResponseError {
            status: response.status,
        });
    }
    Ok(response.bytes)
}

#[cfg(feature = "http")]
fn fetch_url(url: &str, on_done: impl FnOnce(Result<Vec<u8>>) + Send + 'static) {
    ehttp::fetch(ehttp::Request::get(url), move |response| {
        on_done(response_bytes(response));
    });
}

#[cfg(not(feature = "http"))]
fn fetch_url(url: &str, on_done: impl FnOnce(Result<Vec<u8>>) + Send + 'static) {
    on_done(Err(http_disabled(url)));
}

#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
fn fetch_http(url: &str) -> Result<Vec<u8>> {
    response_bytes(ehttp::fetch_blocking(&ehttp::Request::get(url)))
}

#[cfg(all(feature = "http", target_arch = "wasm32"))]
fn fetch_http(url: &str) -> Result<Vec<u8>> {
    Err(ShowroomError::FeatureNotEnabled(format!(
        "blocking load of '{url}' is unavailable in the browser"
    )))
}

#[cfg(not(feature = "http"))]
fn fetch_http(url: &str) -> Result<Vec<u8>> {
    Err(http_disabled(url))
}

#[cfg(not(feature = "http"))]
fn http_disabled(url: &str) -> ShowroomError {
    ShowroomError::FeatureNotEnabled(format!("HTTP loading of '{url}' requires the `http` feature"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::mpsc;

    #[test]
    fn location_prefix_selects_source() {
        assert_eq!(
            AssetSource::from_location("https://example.com/scene.glb"),
            AssetSource::Http("https://example.com/scene.glb".into())
        );
        assert_eq!(
            AssetSource::from_location("./models/scene.glb"),
            AssetSource::File(PathBuf::from("./models/scene.glb"))
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let source = AssetSource::from_location("./definitely/not/here.glb");
        assert!(matches!(source.read_bytes(), Err(ShowroomError::AssetNotFound(_))));
    }

    #[test]
    fn fetch_delivers_file_bytes_to_callback() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/intro_scene.gltf");
        let source = AssetSource::from_location(path);
        let (tx, rx) = mpsc::channel();

        source.fetch(move |bytes| tx.send(bytes).unwrap());

        let bytes = rx.recv().unwrap().unwrap();
        assert_eq!(bytes, std::fs::read(path).unwrap());
    }

    #[test]
    fn fetch_reports_missing_file_through_callback() {
        let source = AssetSource::from_location("./definitely/not/here.glb");
        let (tx, rx) = mpsc::channel();

        source.fetch(move |bytes| tx.send(bytes).unwrap());

        assert!(matches!(rx.recv().unwrap(), Err(ShowroomError::AssetNotFound(_))));
    }
}
