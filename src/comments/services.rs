use std::collections::HashMap;

use sqlx::PgPool;
use tracing::{info, warn};

use super::{dto::SerializedComment, repo, repo_types::Comment};
use crate::{auth::access::check_owner, users, users::repo_types::User};

/// Pairs each comment with its author. Comments whose author is missing are
/// dropped.
pub fn attach_authors(comments: Vec<Comment>, authors: &[User]) -> Vec<SerializedComment> {
    let by_id: HashMap<i64, &User> = authors.iter().map(|u| (u.id, u)).collect();
    comments
        .into_iter()
        .filter_map(|comment| match by_id.get(&comment.created_by_user_id) {
            Some(user) => Some(SerializedComment {
                user: (*user).clone(),
                comment,
            }),
            None => {
                warn!(comment_id = comment.id, "comment author missing");
                None
            }
        })
        .collect()
}

pub async fn find_for_restaurant(
    db: &PgPool,
    restaurant_id: i64,
) -> anyhow::Result<Vec<SerializedComment>> {
    let comments = repo::find_for_restaurant(db, restaurant_id).await?;
    let mut author_ids: Vec<i64> = comments.iter().map(|c| c.created_by_user_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let authors = users::repo::find_for_user_ids(db, &author_ids).await?;
    Ok(attach_authors(comments, &authors))
}

/// Deletes the comment when the requester wrote it; otherwise a silent no-op.
pub async fn delete_comment(
    db: &PgPool,
    comment_id: i64,
    requester_id: i64,
) -> anyhow::Result<bool> {
    let Some(comment) = repo::get(db, comment_id).await? else {
        return Ok(false);
    };
    if !check_owner(comment.created_by_user_id, requester_id).is_allowed() {
        warn!(comment_id, requester_id, "comment delete by non-owner skipped");
        return Ok(false);
    }
    repo::delete(db, comment.id).await?;
    info!(comment_id, "comment deleted");
    Ok(true)
}
