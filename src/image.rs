//! Image encoder used by the listing form. A local image file becomes a
//! self-contained `data:` URI so the catalog snapshot never points at files
//! that may later move; any other input is kept as an opaque handle.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::error::{CatalogError, Result};

pub fn encode_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Split a base64 `data:` URI back into its MIME type and bytes. Returns
/// `None` for anything that is not a base64 data URI.
pub fn decode_data_uri(handle: &str) -> Option<(String, Vec<u8>)> {
    let rest = handle.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some((mime.to_string(), bytes))
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime)
}

/// Read an image file and encode it as a data URI.
pub fn encode_file(path: &Path) -> Result<String> {
    let mime = mime_for(path).ok_or_else(|| {
        CatalogError::Image(format!("{} is not a supported image type", path.display()))
    })?;
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), mime, "encoded image");
    Ok(encode_data_uri(&bytes, mime))
}

/// Turn whatever the user typed into the image field into a stored handle.
/// Existing local files are embedded; everything else (data URIs, site paths,
/// URLs) passes through untouched.
pub fn resolve_image_input(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("data:") {
        return Ok(trimmed.to_string());
    }

    let path = Path::new(trimmed);
    if path.is_file() {
        encode_file(path)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Short summary for previews: MIME type and size for data URIs, the handle
/// itself otherwise.
pub fn describe_handle(handle: &str) -> String {
    match decode_data_uri(handle) {
        Some((mime, bytes)) => format!("{mime}, {:.1} KB", bytes.len() as f64 / 1024.0),
        None => handle.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn data_uri_round_trip() {
        let handle = encode_data_uri(PNG_HEADER, "image/png");
        assert!(handle.starts_with("data:image/png;base64,"));
        assert_eq!(
            decode_data_uri(&handle),
            Some(("image/png".to_string(), PNG_HEADER.to_vec()))
        );
    }

    #[test]
    fn non_data_handles_do_not_decode() {
        assert_eq!(decode_data_uri("/nextjs-development.jpg"), None);
        assert_eq!(decode_data_uri("data:image/png,plain"), None);
    }

    #[test]
    fn local_files_are_embedded() {
        let mut file = tempfile::Builder::new().suffix(".PNG").tempfile().unwrap();
        file.write_all(PNG_HEADER).unwrap();

        let handle = resolve_image_input(file.path().to_str().unwrap()).unwrap();
        let (mime, bytes) = decode_data_uri(&handle).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, PNG_HEADER);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let err = resolve_image_input(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CatalogError::Image(_)));
    }

    #[test]
    fn other_inputs_pass_through() {
        assert_eq!(
            resolve_image_input(" /web-animation-gsap.jpg ").unwrap(),
            "/web-animation-gsap.jpg"
        );
        assert_eq!(
            resolve_image_input("https://cdn.example/a.png").unwrap(),
            "https://cdn.example/a.png"
        );
        assert_eq!(resolve_image_input("").unwrap(), "");
    }

    #[test]
    fn describe_summarises_data_uris() {
        let handle = encode_data_uri(&[0u8; 2048], "image/jpeg");
        assert_eq!(describe_handle(&handle), "image/jpeg, 2.0 KB");
        assert_eq!(describe_handle("/a.jpg"), "/a.jpg");
    }
}
