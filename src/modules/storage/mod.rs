//! Storage module for media files
//!
//! Files live on the local disk under the two configured roots and are
//! served back by the static file routes.

mod local_disk;

pub use local_disk::{LocalStorage, MediaDir};
