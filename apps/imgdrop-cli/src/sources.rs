//! Turns command-line sources into upload items.

use std::path::Path;

use anyhow::Context;
use imgdrop_protocol::ImageItem;

/// Fallback name for URLs whose path has no last segment.
const UNNAMED: &str = "image";

/// Builds an item from a local path or an `http(s)://` URL.
///
/// Local files are read eagerly. URLs are left for the uploader to fetch.
pub fn item_from_source(source: &str) -> anyhow::Result<ImageItem> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return Ok(ImageItem::from_url(url_file_name(source), source));
    }

    let path = Path::new(source);
    let data = std::fs::read(path).with_context(|| format!("failed to read {source}"))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNNAMED.into());
    Ok(ImageItem::from_bytes(name, data).with_extra("source", source))
}

/// Last non-empty path segment of `url`, percent-decoding left to the server.
fn url_file_name(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()?
                .filter(|s| !s.is_empty())
                .last()
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNNAMED.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_file_is_read() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cat.png");
        std::fs::write(&path, b"PNGDATA").unwrap();

        let item = item_from_source(path.to_str().unwrap()).unwrap();
        assert_eq!(item.file_name, "cat.png");
        assert_eq!(item.binary_data.as_deref(), Some(&b"PNGDATA"[..]));
        assert!(item.source_url.is_none());
        assert_eq!(item.extra["source"], path.to_str().unwrap());
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope.png");
        let err = item_from_source(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn url_uses_last_segment() {
        let item = item_from_source("https://img.example.com/a/b/dog.jpg?size=2").unwrap();
        assert_eq!(item.file_name, "dog.jpg");
        assert_eq!(
            item.source_url.as_deref(),
            Some("https://img.example.com/a/b/dog.jpg?size=2")
        );
        assert!(item.binary_data.is_none());
        assert!(item.extra.is_empty());
    }

    #[test]
    fn url_without_path_gets_fallback_name() {
        assert_eq!(url_file_name("https://img.example.com/"), "image");
        assert_eq!(url_file_name("https://img.example.com/pics/"), "pics");
    }
}
