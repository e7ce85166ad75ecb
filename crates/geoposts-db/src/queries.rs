use anyhow::{Context, Result};
use bson::{Document, doc, oid::ObjectId};
use futures_util::TryStreamExt;
use tracing::{debug, info};

use geoposts_types::api::LocationDict;
use geoposts_types::geo::to_storage_point;

use crate::Database;
use crate::models::{Location, LocationUpdate, Post};

impl Database {
    // -- Locations --

    pub async fn create_location(
        &self,
        description: Option<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Location> {
        let location = Location::new(description, latitude, longitude);
        self.locations()
            .insert_one(&location)
            .await
            .context("insert location")?;

        info!("Location {} stored at ({}, {})", location.id, latitude, longitude);
        Ok(location)
    }

    pub async fn get_location(&self, id: ObjectId) -> Result<Option<Location>> {
        self.locations()
            .find_one(doc! { "_id": id })
            .await
            .context("find location by id")
    }

    /// Locations whose `geom` lies within `radius` metres of the given point,
    /// nearest first, at most `limit` of them.
    pub async fn find_locations_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius: f64,
        limit: i64,
    ) -> Result<Vec<LocationDict>> {
        let cursor = self
            .locations()
            .find(near_filter(latitude, longitude, radius)?)
            .limit(limit)
            .await
            .context("near query")?;

        let rows: Vec<Location> = cursor.try_collect().await.context("read near results")?;
        debug!(
            "{} location(s) within {}m of ({}, {})",
            rows.len(),
            radius,
            latitude,
            longitude
        );

        Ok(rows.iter().map(Location::to_dict).collect())
    }

    /// Returns `true` if a document matched `id`.
    pub async fn update_location(&self, id: ObjectId, update: LocationUpdate) -> Result<bool> {
        let mut set = Document::new();
        if let Some(description) = update.description {
            set.insert("description", description);
        }
        if let Some((latitude, longitude)) = update.position {
            set.insert("geom", bson::to_bson(&to_storage_point(latitude, longitude))?);
        }
        if set.is_empty() {
            return Ok(self.get_location(id).await?.is_some());
        }

        let result = self
            .locations()
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await
            .context("update location")?;

        Ok(result.matched_count == 1)
    }

    /// Returns `true` if a document was removed.
    pub async fn delete_location(&self, id: ObjectId) -> Result<bool> {
        let result = self
            .locations()
            .delete_one(doc! { "_id": id })
            .await
            .context("delete location")?;

        Ok(result.deleted_count == 1)
    }

    // -- Posts --

    pub async fn create_post(&self, title: String, content: String) -> Result<Post> {
        let post = Post::new(title, content);
        self.posts()
            .insert_one(&post)
            .await
            .context("insert post")?;

        info!("Post {} stored", post.id);
        Ok(post)
    }
}

/// `$near` filter against the 2dsphere index on `geom`.
fn near_filter(latitude: f64, longitude: f64, radius: f64) -> Result<Document> {
    Ok(doc! {
        "geom": {
            "$near": {
                "$geometry": bson::to_bson(&to_storage_point(latitude, longitude))?,
                "$maxDistance": radius,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_filter_centers_on_lng_lat() {
        let filter = near_filter(52.516, 13.378, 1000.0).unwrap();
        let near = filter
            .get_document("geom")
            .and_then(|g| g.get_document("$near"))
            .unwrap();

        let coords = near
            .get_document("$geometry")
            .and_then(|g| g.get_array("coordinates"))
            .unwrap();
        assert_eq!(coords[0].as_f64(), Some(13.378));
        assert_eq!(coords[1].as_f64(), Some(52.516));
        assert_eq!(near.get_f64("$maxDistance").unwrap(), 1000.0);
    }
}
