use std::collections::HashSet;

use tracing::{info, warn};

use super::{
    repo,
    repo_types::{NewPhotoUrl, PhotoUrl},
};
use crate::{auth::access::check_owner, restaurants, state::AppState, storage::StorageClient};

/// Incoming photos whose URL is not stored yet; a URL repeated in the request
/// is kept once.
pub fn only_new(existing: &[PhotoUrl], incoming: &[NewPhotoUrl]) -> Vec<NewPhotoUrl> {
    let mut seen: HashSet<&str> = existing.iter().map(|p| p.url.as_str()).collect();
    incoming
        .iter()
        .filter(|p| seen.insert(p.url.as_str()))
        .cloned()
        .collect()
}

/// Removes the objects behind `photos`. Failures are logged and skipped;
/// returns how many objects were deleted.
pub async fn delete_files(storage: &dyn StorageClient, photos: &[PhotoUrl]) -> usize {
    let mut deleted = 0;
    for photo in photos {
        match storage.delete_by_url(&photo.url).await {
            Ok(()) => deleted += 1,
            Err(e) => warn!(
                error = %e,
                photo_id = photo.id,
                url = %photo.url,
                "object delete failed"
            ),
        }
    }
    deleted
}

/// Deletes a photo of a restaurant owned by the requester. Anything else is a
/// silent no-op; returns whether the photo was removed.
pub async fn delete_photo(
    st: &AppState,
    restaurant_id: i64,
    photo_id: i64,
    requester_id: i64,
) -> anyhow::Result<bool> {
    let Some(photo) = repo::get(&st.db, photo_id).await? else {
        return Ok(false);
    };
    if photo.restaurant_id != restaurant_id {
        warn!(photo_id, restaurant_id, "photo belongs to another restaurant");
        return Ok(false);
    }
    let Some(restaurant) = restaurants::repo::get(&st.db, restaurant_id).await? else {
        return Ok(false);
    };
    if !check_owner(restaurant.created_by_user_id, requester_id).is_allowed() {
        warn!(photo_id, requester_id, "photo delete by non-owner skipped");
        return Ok(false);
    }

    repo::delete(&st.db, photo.id).await?;
    delete_files(st.storage.as_ref(), std::slice::from_ref(&photo)).await;
    info!(photo_id, restaurant_id, "photo deleted");
    Ok(true)
}
