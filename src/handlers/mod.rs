use actix_multipart::form::tempfile::TempFile;

use crate::error::{field_error, ApiError};
use crate::storage::{ImageStore, ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES};

pub mod auth;
pub mod bookings;
pub mod hotels;
pub mod rooms;

/// Validate an uploaded image (type, size) and hand it to the storage
/// collaborator. Returns the path string persisted on the entity.
pub(crate) fn store_image(
    images: &dyn ImageStore,
    file: &TempFile,
    field: &'static str,
    subdir: &str,
) -> Result<String, ApiError> {
    if file.size > MAX_IMAGE_BYTES {
        return Err(field_error(field, "max", "The image may not be larger than 5 MB").into());
    }

    let allowed = file
        .content_type
        .as_ref()
        .is_some_and(|mime| ALLOWED_IMAGE_TYPES.contains(&mime.essence_str()));
    if !allowed {
        return Err(field_error(
            field,
            "mimes",
            "The image must be a file of type: jpeg, png, jpg, gif",
        )
        .into());
    }

    Ok(images.save(file.file.path(), file.file_name.as_deref(), subdir)?)
}
