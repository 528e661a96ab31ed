mod media_policy;

pub use media_policy::{validate_file_name, HomepageMediaType, MediaKind, UploadedFile};
