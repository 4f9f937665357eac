//! Profile image pipeline.
//!
//! Takes the uploaded bytes, resizes them into a bounded thumbnail and
//! writes the result under a collision-resistant filename. The new file is
//! written before the previous one is deleted, so a failed write never
//! leaves the user without a photo; the returned filename is only handed to
//! the caller once the file is on disk, so the user row can never point at
//! a file that was not written.

use std::path::Path;

use rand::Rng;

use crate::backend::auth::users::User;
use crate::backend::error::AppError;

/// Thumbnail bounding box, width and height.
const THUMBNAIL_MAX: u32 = 200;

/// Length of the random filename token, in hex characters.
const TOKEN_HEX_LEN: usize = 16;

/// Process an uploaded profile photo and return the new filename.
///
/// `original_name` is the client-supplied filename; its stem and extension
/// are preserved around the random token. `previous` is the user's current
/// photo filename: it is removed after the new file lands, unless it is the
/// default sentinel. Stale-file removal failures are logged, not fatal.
pub fn save_profile_image(
    media_dir: &Path,
    original_name: &str,
    data: &[u8],
    previous: &str,
) -> Result<String, AppError> {
    let decoded = image::load_from_memory(data).map_err(AppError::ImageDecode)?;

    let original = Path::new(original_name);
    let stem = original
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("foto");
    let extension = original
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("jpg");

    let filename = format!("{stem}{}.{extension}", random_token());
    let destination = media_dir.join(&filename);

    let thumbnail = decoded.thumbnail(THUMBNAIL_MAX, THUMBNAIL_MAX);
    thumbnail.save(&destination).map_err(|e| match e {
        image::ImageError::IoError(io) => AppError::Storage(io),
        other => AppError::Storage(std::io::Error::other(other)),
    })?;

    if previous != User::DEFAULT_PHOTO {
        let stale = media_dir.join(previous);
        if let Err(e) = std::fs::remove_file(&stale) {
            tracing::warn!("could not remove stale profile photo {}: {e}", stale.display());
        }
    }

    Ok(filename)
}

/// 16 hex characters from the OS random source.
fn random_token() -> String {
    let bytes: [u8; TOKEN_HEX_LEN / 2] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
