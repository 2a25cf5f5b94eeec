use gloo_net::http::Request;
use log::info;

use super::store::PointStore;
use super::types::SongRecord;
use crate::error::{Error, Result};

/// Fetches the precomputed coordinates and builds the store.
pub async fn fetch_points(url: &str, scale: f64) -> Result<PointStore> {
	info!("loading points from {url}");
	let resp = Request::get(url).send().await?;
	if !resp.ok() {
		return Err(Error::Fetch(format!(
			"{} answered {} {}",
			url,
			resp.status(),
			resp.status_text()
		)));
	}
	let body = resp.text().await?;
	let store = parse_points(&body, scale)?;
	info!("loaded {} points", store.len());
	Ok(store)
}

/// Decodes the service's JSON array into a store in display space.
pub fn parse_points(body: &str, scale: f64) -> Result<PointStore> {
	let records: Vec<SongRecord> = serde_json::from_str(body)?;
	Ok(PointStore::from_records(&records, scale))
}
