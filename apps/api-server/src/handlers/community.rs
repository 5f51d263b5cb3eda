//! Post handlers: listing, detail, writes and likes.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use filmme_core::domain::{Category, Page, PostDetails, PostOrdering, PostWithLikes};
use filmme_core::service::{NewPost, PostChanges};
use filmme_shared::Paginated;
use filmme_shared::dto::{
    CreatePostRequest, LikeResponse, ListPostsQuery, PostBody, PostDetail, PostListItem,
    PostSummary, TipSummary, UpdatePostRequest,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Listings show this many characters of a cinema tip.
const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct CategoryPath {
    category: String,
}

#[derive(Debug, Deserialize)]
pub struct PostPath {
    category: String,
    id: Uuid,
}

impl PostPath {
    pub fn category(&self) -> AppResult<Category> {
        Ok(self.category.parse()?)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// GET /communities/{category}
pub async fn list_posts(
    state: web::Data<AppState>,
    path: web::Path<CategoryPath>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let category: Category = path.category.parse()?;
    let query = query.into_inner();

    let page = state
        .community
        .list_posts(
            category,
            PostOrdering::from_param(query.ordering.as_deref()),
            query.search.as_deref(),
            query.page,
            query.page_size,
        )
        .await?;

    Ok(HttpResponse::Ok().json(paginated(page, list_item)))
}

/// POST /communities/{category}
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<CategoryPath>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let category: Category = path.category.parse()?;
    let req = body.into_inner();

    let entry = state
        .community
        .create_post(
            identity.user_id,
            category,
            NewPost {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(detail(PostDetails::new(entry, Some(false)))))
}

/// GET /communities/{category}/{id}
pub async fn retrieve_post(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<PostPath>,
) -> AppResult<HttpResponse> {
    let details = state
        .community
        .retrieve_post(path.category()?, path.id(), viewer.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(detail(details)))
}

/// PUT|PATCH /communities/{category}/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<PostPath>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
    };

    let details = state
        .community
        .update_post(identity.user_id, path.category()?, path.id(), changes)
        .await?;

    Ok(HttpResponse::Ok().json(detail(details)))
}

/// DELETE /communities/{category}/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<PostPath>,
) -> AppResult<HttpResponse> {
    state
        .community
        .delete_post(identity.user_id, path.category()?, path.id())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /communities/{category}/{id}/like
pub async fn like_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<PostPath>,
) -> AppResult<HttpResponse> {
    let status = state
        .community
        .like_post(identity.user_id, path.category()?, path.id())
        .await?;

    let detail = if status.changed {
        "Post liked."
    } else {
        "Post already liked."
    };

    Ok(HttpResponse::Ok().json(LikeResponse {
        detail: detail.to_string(),
        liked: status.liked,
        like_count: status.like_count,
    }))
}

/// DELETE /communities/{category}/{id}/like
pub async fn unlike_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<PostPath>,
) -> AppResult<HttpResponse> {
    let status = state
        .community
        .unlike_post(identity.user_id, path.category()?, path.id())
        .await?;

    Ok(HttpResponse::Ok().json(LikeResponse {
        detail: "Like removed.".to_string(),
        liked: status.liked,
        like_count: status.like_count,
    }))
}

// ----- presentation -----

pub(super) fn paginated<T, U>(page: Page<T>, present: impl FnMut(T) -> U) -> Paginated<U> {
    let total_pages = page.total_pages();
    let page = page.map(present);

    Paginated {
        count: page.total,
        page: page.page,
        page_size: page.page_size,
        total_pages,
        results: page.items,
    }
}

fn list_item(entry: PostWithLikes) -> PostListItem {
    let PostWithLikes { post, like_count } = entry;
    let summary = PostSummary {
        id: post.id,
        title: post.title,
        writer_id: post.user_id,
        view_count: post.view_count,
        like_count,
        created_at: post.created_at,
    };

    match post.category {
        Category::Common => PostListItem::Common(summary),
        Category::CinemaTip => PostListItem::CinemaTip(TipSummary {
            summary,
            preview: post.content.chars().take(PREVIEW_CHARS).collect(),
        }),
        Category::Suggestion => PostListItem::Suggestion(summary),
    }
}

fn detail(details: PostDetails) -> PostDetail {
    let PostDetails {
        post,
        like_count,
        liked,
    } = details;
    let category = post.category;
    let body = PostBody {
        id: post.id,
        title: post.title,
        content: post.content,
        writer_id: post.user_id,
        view_count: post.view_count,
        like_count,
        liked,
        created_at: post.created_at,
        updated_at: post.updated_at,
    };

    match category {
        Category::Common => PostDetail::Common(body),
        Category::CinemaTip => PostDetail::CinemaTip(body),
        Category::Suggestion => PostDetail::Suggestion(body),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    use super::*;
    use crate::handlers::testing::{bearer, state};

    async fn seed(state: &AppState, author: Uuid, category: Category, title: &str) -> Uuid {
        state
            .community
            .create_post(
                author,
                category,
                NewPost {
                    title: title.to_string(),
                    content: format!("{title} body"),
                },
            )
            .await
            .unwrap()
            .post
            .id
    }

    #[actix_rt::test]
    async fn test_create_requires_authentication() {
        let state = state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/communities/common/")
            .set_json(json!({"title": "Hello", "content": "First post"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_create_then_list() {
        let state = state();
        let app = test_app!(state);
        let author = Uuid::new_v4();

        let req = test::TestRequest::post()
            .uri("/communities/cinema_tip/")
            .insert_header(bearer(author))
            .set_json(json!({"title": "  Aisle seats  ", "content": "x".repeat(150)}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["category"], "cinema_tip");
        assert_eq!(created["title"], "Aisle seats");
        assert_eq!(created["writer_id"], author.to_string());
        assert_eq!(created["view_count"], 0);
        assert_eq!(created["liked"], false);

        let req = test::TestRequest::get()
            .uri("/communities/cinema-tip")
            .to_request();
        let listing: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(listing["count"], 1);
        assert_eq!(listing["page"], 1);
        assert_eq!(listing["total_pages"], 1);
        let item = &listing["results"][0];
        assert_eq!(item["id"], created["id"]);
        assert_eq!(item["preview"].as_str().unwrap().chars().count(), 100);
        assert!(item.get("content").is_none());
    }

    #[actix_rt::test]
    async fn test_unknown_category_is_not_found() {
        let state = state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/communities/reviews/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/communities/common/not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_post_is_scoped_to_its_category() {
        let state = state();
        let id = seed(&state, Uuid::new_v4(), Category::Suggestion, "More matinees").await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri(&format!("/communities/common/{id}/"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_each_retrieve_counts_one_view() {
        let state = state();
        let id = seed(&state, Uuid::new_v4(), Category::Common, "Hello").await;
        let app = test_app!(state);

        for expected in 1..=3 {
            let req = test::TestRequest::get()
                .uri(&format!("/communities/common/{id}/"))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;

            assert_eq!(body["view_count"], expected);
            assert!(body.get("liked").is_none());
        }
    }

    #[actix_rt::test]
    async fn test_popular_ordering_follows_views() {
        let state = state();
        let author = Uuid::new_v4();
        let quiet = seed(&state, author, Category::Common, "Quiet").await;
        let busy = seed(&state, author, Category::Common, "Busy").await;

        for _ in 0..2 {
            state.community.retrieve_post(Category::Common, busy, None).await.unwrap();
        }
        state.community.retrieve_post(Category::Common, quiet, None).await.unwrap();

        let app = test_app!(state);
        let req = test::TestRequest::get()
            .uri("/communities/common?ordering=popular")
            .to_request();
        let listing: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(listing["results"][0]["id"], busy.to_string());
        assert_eq!(listing["results"][1]["id"], quiet.to_string());
    }

    #[actix_rt::test]
    async fn test_search_matches_title_case_insensitively() {
        let state = state();
        let author = Uuid::new_v4();
        seed(&state, author, Category::Common, "Best popcorn in town").await;
        seed(&state, author, Category::Common, "Parking tips").await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/communities/common?search=POPCORN")
            .to_request();
        let listing: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(listing["count"], 1);
        assert_eq!(listing["results"][0]["title"], "Best popcorn in town");
    }

    #[actix_rt::test]
    async fn test_page_bounds() {
        let state = state();
        seed(&state, Uuid::new_v4(), Category::Common, "Only one").await;
        let app = test_app!(state);

        let req = test::TestRequest::get()
            .uri("/communities/common?page=2")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/communities/common?page=0")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/communities/common?page=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/communities/suggestion")
            .to_request();
        let listing: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listing["count"], 0);
        assert_eq!(listing["results"], json!([]));
    }

    #[actix_rt::test]
    async fn test_huge_page_numbers_are_invalid_pages() {
        let state = state();
        let id = seed(&state, Uuid::new_v4(), Category::Common, "Only one").await;
        let app = test_app!(state);

        for uri in [
            format!("/communities/common?page={}", u64::MAX),
            format!("/communities/common?page={}&page_size=50", u64::MAX / 2),
            format!("/communities/common/{id}/comments?page={}", u64::MAX),
        ] {
            let req = test::TestRequest::get().uri(&uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["detail"], "Invalid page.");
        }
    }

    #[actix_rt::test]
    async fn test_only_the_author_may_modify() {
        let state = state();
        let author = Uuid::new_v4();
        let id = seed(&state, author, Category::Common, "Original").await;
        let app = test_app!(state);
        let uri = format!("/communities/common/{id}/");

        let req = test::TestRequest::patch()
            .uri(&uri)
            .set_json(json!({"title": "Anonymous edit"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::patch()
            .uri(&uri)
            .insert_header(bearer(Uuid::new_v4()))
            .set_json(json!({"title": "Hijacked"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(Uuid::new_v4()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(author))
            .set_json(json!({"title": "Edited"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["title"], "Edited");
        assert_eq!(body["content"], "Original body");

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(author))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_invalid_update_is_rejected() {
        let state = state();
        let author = Uuid::new_v4();
        let id = seed(&state, author, Category::Common, "Original").await;
        let app = test_app!(state);

        let req = test::TestRequest::patch()
            .uri(&format!("/communities/common/{id}"))
            .insert_header(bearer(author))
            .set_json(json!({"title": "   "}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::patch()
            .uri(&format!("/communities/common/{id}"))
            .insert_header(bearer(author))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_like_is_idempotent() {
        let state = state();
        let id = seed(&state, Uuid::new_v4(), Category::Common, "Likeable").await;
        let app = test_app!(state);
        let fan = Uuid::new_v4();
        let uri = format!("/communities/common/{id}/like/");

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri(&uri)
                .insert_header(bearer(fan))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["liked"], true);
            assert_eq!(body["like_count"], 1);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/communities/common/{id}"))
            .insert_header(bearer(fan))
            .to_request();
        let detail: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail["liked"], true);
        assert_eq!(detail["like_count"], 1);

        for _ in 0..2 {
            let req = test::TestRequest::delete()
                .uri(&uri)
                .insert_header(bearer(fan))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["liked"], false);
            assert_eq!(body["like_count"], 0);
        }
    }

    #[actix_rt::test]
    async fn test_like_requires_authentication() {
        let state = state();
        let id = seed(&state, Uuid::new_v4(), Category::Common, "Likeable").await;
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/communities/common/{id}/like"))
            .to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
