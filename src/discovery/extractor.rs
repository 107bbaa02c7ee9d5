//! Conversion of a work's detail record into image tasks.

use tracing::warn;

use crate::persist::name_with_content_hash;
use crate::task::{ImageTask, Naming};

use super::models::{Asset, WorkDetail};

/// Yields one [`ImageTask`] per image-bearing asset of `detail`, in asset order.
///
/// Assets without an image (embedded players, 3D viewers) are skipped. Tasks
/// carry no placement; the caller tags them with the album they came from.
pub fn extract_images(detail: &WorkDetail) -> impl Iterator<Item = ImageTask> + '_ {
    detail
        .assets
        .iter()
        .filter(|asset| asset.has_image)
        .filter_map(|asset| image_task(detail, asset))
}

fn image_task(detail: &WorkDetail, asset: &Asset) -> Option<ImageTask> {
    let Some(url) = asset.image_url.as_deref().filter(|url| !url.is_empty()) else {
        warn!(
            work = detail.hash_id.as_deref().unwrap_or("?"),
            asset_id = ?asset.id,
            "asset flagged as image but has no image_url"
        );
        return None;
    };
    Some(ImageTask::new(url, Naming::derived(name_with_content_hash)))
}
