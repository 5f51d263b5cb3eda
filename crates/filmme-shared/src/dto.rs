//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ----- accounts -----

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub nickname: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

// ----- posts -----

/// Query string of the post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    /// `popular`, `like`, or anything else for newest first.
    pub ordering: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Query string of paginated sub-listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Partial update; omitted fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Fields every post list item carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub writer_id: Uuid,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Cinema tips show the start of the tip in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipSummary {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub preview: String,
}

/// One row of a post listing, shaped by the post's category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum PostListItem {
    Common(PostSummary),
    CinemaTip(TipSummary),
    Suggestion(PostSummary),
}

/// Full post body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostBody {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub writer_id: Uuid,
    pub view_count: i64,
    pub like_count: i64,
    /// Whether the caller likes the post; absent for anonymous callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post's detail page, shaped by the post's category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum PostDetail {
    Common(PostBody),
    CinemaTip(PostBody),
    Suggestion(PostBody),
}

impl PostDetail {
    pub fn body(&self) -> &PostBody {
        match self {
            PostDetail::Common(body) | PostDetail::CinemaTip(body) | PostDetail::Suggestion(body) => {
                body
            }
        }
    }
}

/// Result of a like or unlike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub detail: String,
    pub liked: bool,
    pub like_count: i64,
}

// ----- comments -----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub writer_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PostSummary {
        PostSummary {
            id: Uuid::nil(),
            title: "Where to sit".to_string(),
            writer_id: Uuid::nil(),
            view_count: 4,
            like_count: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_list_items_are_tagged_with_category() {
        let item = PostListItem::CinemaTip(TipSummary {
            summary: summary(),
            preview: "Row H".to_string(),
        });
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["category"], "cinema_tip");
        assert_eq!(json["title"], "Where to sit");
        assert_eq!(json["preview"], "Row H");

        let json = serde_json::to_value(PostListItem::Common(summary())).unwrap();
        assert_eq!(json["category"], "common");
        assert!(json.get("preview").is_none());
    }

    #[test]
    fn test_anonymous_detail_omits_liked() {
        let body = PostBody {
            id: Uuid::nil(),
            title: "t".to_string(),
            content: "c".to_string(),
            writer_id: Uuid::nil(),
            view_count: 1,
            like_count: 0,
            liked: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(PostDetail::Suggestion(body)).unwrap();

        assert_eq!(json["category"], "suggestion");
        assert!(json.get("liked").is_none());
    }

    #[test]
    fn test_update_request_fields_are_optional() {
        let req: UpdatePostRequest = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("New"));
        assert!(req.content.is_none());
    }
}
