use crate::error::ApiError;
use actix_multipart::{Field, MultipartError};
use actix_web::web::Bytes;
use chrono::Utc;
use futures_util::{Stream, TryStreamExt};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use tracing::error;
use uuid::Uuid;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix the upload directory is served under.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Drain a single multipart image field to the upload directory and return
/// the relative URL of the stored file.
///
/// The payload is buffered and size-checked before anything touches disk, so
/// an oversized upload never leaves a truncated file behind.
pub async fn accept_upload(field: &mut Field, upload_dir: &str) -> Result<String, ApiError> {
    let mime = match field.content_type() {
        Some(m) => m.essence_str().to_string(),
        None => return Err(ApiError::UnsupportedMediaType("unknown".to_string())),
    };
    validate_mime(&mime)?;

    let original = field
        .content_disposition()
        .get_filename()
        .map(|s| s.to_string());

    let data = read_limited(field, MAX_IMAGE_BYTES).await?;

    let filename = storage_filename(original.as_deref(), &mime);
    store_file(upload_dir, &filename, &data)?;

    Ok(format!("{}/{}", UPLOAD_URL_PREFIX, filename))
}

fn validate_mime(mime: &str) -> Result<(), ApiError> {
    if ALLOWED_IMAGE_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType(mime.to_string()))
    }
}

/// Millisecond timestamp plus a random nonce, original extension preserved.
/// Unique per write; an on-disk collision is handled in `store_file`.
fn storage_filename(original: Option<&str>, mime: &str) -> String {
    let ext = original
        .and_then(|name| Path::new(name).extension().and_then(|e| e.to_str()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| default_extension(mime).to_string());

    let nonce = Uuid::new_v4().to_simple().to_string();

    format!("{}-{}.{}", Utc::now().timestamp_millis(), &nonce[..8], ext)
}

fn default_extension(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/gif" => "gif",
        _ => "jpg",
    }
}

async fn read_limited<S>(stream: &mut S, max_bytes: usize) -> Result<Vec<u8>, ApiError>
where
    S: Stream<Item = Result<Bytes, MultipartError>> + Unpin,
{
    let mut data = Vec::new();

    while let Some(chunk) = stream.try_next().await.map_err(|e| {
        error!(error = %e, "multipart field stream failed");
        ApiError::BadPayload
    })? {
        if data.len() + chunk.len() > max_bytes {
            return Err(ApiError::PayloadTooLarge(max_bytes));
        }
        data.extend_from_slice(&chunk);
    }

    Ok(data)
}

fn store_file(dir: &str, filename: &str, data: &[u8]) -> Result<(), ApiError> {
    let path = Path::new(dir).join(filename);

    // create_new: an existing name is a hard failure, never an overwrite.
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(ApiError::StorageConflict);
        }
        Err(e) => {
            error!(error = %e, path = %path.display(), "failed to create upload file");
            return Err(ApiError::StorageUnavailable);
        }
    };

    if let Err(e) = file.write_all(data) {
        error!(error = %e, path = %path.display(), "failed to write upload file");
        drop(file);
        let _ = std::fs::remove_file(&path);
        return Err(ApiError::StorageUnavailable);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn byte_stream(chunks: Vec<Vec<u8>>) -> impl Stream<Item = Result<Bytes, MultipartError>> + Unpin {
        stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c))))
    }

    #[actix_web::test]
    async fn read_limited_accepts_payload_at_limit() {
        let mut s = byte_stream(vec![vec![0u8; 1024], vec![0u8; 1024]]);
        let data = read_limited(&mut s, 2048).await.unwrap();
        assert_eq!(data.len(), 2048);
    }

    #[actix_web::test]
    async fn read_limited_rejects_oversized_payload() {
        // 6 MiB against the 5 MiB cap, delivered in 1 MiB chunks.
        let mut s = byte_stream(vec![vec![0u8; 1024 * 1024]; 6]);
        let err = read_limited(&mut s, MAX_IMAGE_BYTES).await.unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge(_)));
    }

    #[actix_web::test]
    async fn oversized_payload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = byte_stream(vec![vec![0u8; 1024 * 1024]; 6]);
        assert!(read_limited(&mut s, MAX_IMAGE_BYTES).await.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn filenames_are_distinct_within_the_same_millisecond() {
        let a = storage_filename(Some("photo.jpg"), "image/jpeg");
        let b = storage_filename(Some("photo.jpg"), "image/jpeg");
        assert_ne!(a, b);
    }

    #[test]
    fn filename_preserves_original_extension() {
        let name = storage_filename(Some("portrait.PNG"), "image/png");
        assert!(name.ends_with(".png"), "got {name}");
    }

    #[test]
    fn filename_falls_back_to_mime_extension() {
        let name = storage_filename(None, "image/gif");
        assert!(name.ends_with(".gif"), "got {name}");
    }

    #[test]
    fn mime_allow_list() {
        assert!(validate_mime("image/jpeg").is_ok());
        assert!(validate_mime("image/png").is_ok());
        assert!(validate_mime("image/gif").is_ok());
        assert!(matches!(
            validate_mime("text/plain"),
            Err(ApiError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            validate_mime("application/pdf"),
            Err(ApiError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn store_file_writes_and_detects_collision() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        store_file(dir_str, "123-abc.jpg", b"first").unwrap();
        assert_eq!(std::fs::read(dir.path().join("123-abc.jpg")).unwrap(), b"first");

        let err = store_file(dir_str, "123-abc.jpg", b"second").unwrap_err();
        assert!(matches!(err, ApiError::StorageConflict));
        // Original content untouched.
        assert_eq!(std::fs::read(dir.path().join("123-abc.jpg")).unwrap(), b"first");
    }
}
