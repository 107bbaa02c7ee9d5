//! On-disk layout for downloaded images.
//!
//! Files land in `{base}/[{album}/]{filename}`. Album names and filenames are
//! sanitized into single safe path components (filenames keep their inner
//! dots), and derived filenames carry a content hash, so saving the same
//! image twice overwrites instead of duplicating.

mod error;
mod filename;
mod sink;

pub use error::PersistError;
pub use filename::{name_with_content_hash, sanitize_component, sanitize_filename};
pub use sink::PersistenceSink;
