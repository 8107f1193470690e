//! Room listing models, matching the marketplace's read API payloads.

use serde::Deserialize;

/// A hosted photo reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Photo {
    pub url: String,
}

/// Public account info of a listing's host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostAccount {
    pub photo: Option<Photo>,
}

/// The host of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Host {
    pub account: HostAccount,
}

/// A room listing as served by the marketplace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: u32,
    #[serde(rename = "ratingValue")]
    pub rating_value: f64,
    pub reviews: u32,
    pub photos: Vec<Photo>,
    /// Coordinates as `[longitude, latitude]`, the order the API uses.
    pub location: Vec<f64>,
    pub user: Host,
}

impl Room {
    pub fn longitude(&self) -> f64 {
        self.location.first().copied().unwrap_or_default()
    }

    pub fn latitude(&self) -> f64 {
        self.location.get(1).copied().unwrap_or_default()
    }
}
