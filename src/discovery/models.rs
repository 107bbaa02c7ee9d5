//! Listing and detail records returned by the portfolio JSON API.
//!
//! Only the fields discovery needs are modelled; everything else in the
//! payloads is ignored.

use serde::Deserialize;

/// One page of a paginated listing.
///
/// `total_count` is the server's count of the whole collection and may differ
/// from `data.len()` (partial last page).
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse<T> {
    pub total_count: u64,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// A work as seen in a listing page: enough to fetch its detail record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkSummary {
    #[serde(default)]
    pub id: Option<u64>,
    pub hash_id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Full work record with its asset list.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkDetail {
    #[serde(default)]
    pub hash_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// One media entry inside a work.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub asset_type: AssetType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Image,
    Cover,
    #[default]
    #[serde(other)]
    Other,
}

/// Album entry as returned by the album index.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

/// A named grouping of works.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Album {
    pub id: u64,
    pub name: String,
}

impl From<AlbumRecord> for Album {
    fn from(record: AlbumRecord) -> Self {
        Self {
            id: record.id,
            name: record.title,
        }
    }
}
