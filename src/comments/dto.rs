use serde::{Deserialize, Serialize};

use super::repo_types::{Comment, NewComment};
use crate::users::repo_types::User;

/// `{"comment": {...}}`
#[derive(Debug, Deserialize)]
pub struct CommentWrapper {
    pub comment: NewComment,
}

/// A comment with its author resolved at read time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: User,
}
