//! Interaction engine behavior: likes, comments, replies, pagination.

mod common;

use actix_web::{test, web, App};
use futures::future::join_all;
use serde_json::json;
use std::collections::HashSet;
use std::time::Duration;
use uuid::Uuid;

use common::{build_state, create_post, fetch_post, register_user, start_postgres};
use social_content_service::services::PostService;
use social_content_service::{api_routes, json_config};

#[actix_web::test]
async fn like_is_idempotent_and_unlike_round_trips() {
    let (_pg, pg_url) = start_postgres().await;
    let state = build_state(&pg_url).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .configure(api_routes),
    )
    .await;

    let author = register_user(&app, "A", "a@x.com", "secret123").await;
    let liker = register_user(&app, "B", "b@x.com", "secret123").await;
    let post_id = create_post(&app, &author, "hello").await;

    // Fresh post: no likes, no comments
    let post = fetch_post(&app, &author, &post_id).await;
    assert_eq!(post["likes"], json!([]));
    assert_eq!(post["comments"], json!([]));

    // First like from a second user
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/like/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {liker}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let post: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(post["likes"].as_array().unwrap().len(), 1);

    // Re-liking is a no-op: still exactly one entry
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/like/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {liker}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let post: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(post["likes"].as_array().unwrap().len(), 1);

    // Unlike restores the pre-like state
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/unlike/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {liker}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let post: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(post["likes"], json!([]));

    // Unliking a never-liked post is a no-op, not an error
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/unlike/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {liker}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let post: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(post["likes"], json!([]));
}

#[actix_web::test]
async fn liking_a_missing_post_is_not_found() {
    let (_pg, pg_url) = start_postgres().await;
    let state = build_state(&pg_url).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .configure(api_routes),
    )
    .await;

    let token = register_user(&app, "A", "a@x.com", "secret123").await;
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/like/{}", Uuid::new_v4()))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 404);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["msg"], "Post not found");
}

#[actix_web::test]
async fn comments_and_replies_append_in_order() {
    let (_pg, pg_url) = start_postgres().await;
    let state = build_state(&pg_url).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .configure(api_routes),
    )
    .await;

    let token = register_user(&app, "A", "a@x.com", "secret123").await;
    let post_id = create_post(&app, &token, "hello").await;

    let mut comment_ids = Vec::new();
    for text in ["first", "second"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/comments/create/{post_id}"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "content": text }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        let comment: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(comment["replies"], json!([]));
        comment_ids.push(comment["id"].as_str().unwrap().to_string());
    }

    // The post's comment list preserves insertion order
    let post = fetch_post(&app, &token, &post_id).await;
    let listed: Vec<String> = post["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|id| id.as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed, comment_ids);

    // Reply to the first comment
    let req = test::TestRequest::post()
        .uri(&format!("/api/comments/reply/{}", comment_ids[0]))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "content": "a reply" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let reply: serde_json::Value = test::read_body_json(res).await;
    let reply_id = reply["id"].as_str().unwrap().to_string();

    // The parent's reply list shows the reply; bulk fetch is keyed by id
    let req = test::TestRequest::post()
        .uri("/api/comments")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "commentIds": comment_ids }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let map: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(map[&comment_ids[0]]["replies"], json!([reply_id]));
    assert_eq!(map[&comment_ids[1]]["replies"], json!([]));
}

#[actix_web::test]
async fn commenting_on_a_missing_post_leaves_no_orphan() {
    let (_pg, pg_url) = start_postgres().await;
    let state = build_state(&pg_url).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config())
            .configure(api_routes),
    )
    .await;

    let token = register_user(&app, "A", "a@x.com", "secret123").await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/comments/create/{}", Uuid::new_v4()))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "content": "into the void" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 404);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["msg"], "Post not found");

    // The create+attach transaction rolled back: no unattached comment row
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&state.db)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn pagination_reports_more_records_on_an_exactly_full_page() {
    let (_pg, pg_url) = start_postgres().await;
    let state = build_state(&pg_url).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .configure(api_routes),
    )
    .await;

    let token = register_user(&app, "A", "a@x.com", "secret123").await;
    for n in 0..10 {
        create_post(&app, &token, &format!("post {n}")).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/posts?currentPage=1&pageSize=10")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = test::read_body_json(res).await;

    assert_eq!(body["posts"].as_object().unwrap().len(), 10);
    assert_eq!(body["pagination"]["totalRecords"], 10);
    // Exactly 10 posts exist, yet a full page reports more. Preserved quirk.
    assert_eq!(body["pagination"]["hasMoreRecords"], true);

    let req = test::TestRequest::get()
        .uri("/api/posts?currentPage=2&pageSize=10")
        .to_request();
    let res = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["posts"].as_object().unwrap().len(), 0);
    assert_eq!(body["pagination"]["hasMoreRecords"], false);

    // A ludicrous page number is just an empty page, never an error
    let req = test::TestRequest::get()
        .uri("/api/posts?currentPage=9223372036854775807&pageSize=10")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["posts"].as_object().unwrap().len(), 0);
}

#[actix_web::test]
async fn consecutive_pages_neither_skip_nor_repeat() {
    let (_pg, pg_url) = start_postgres().await;
    let state = build_state(&pg_url).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .configure(api_routes),
    )
    .await;

    let token = register_user(&app, "A", "a@x.com", "secret123").await;
    for n in 0..15 {
        create_post(&app, &token, &format!("post {n}")).await;
    }

    let mut seen: HashSet<String> = HashSet::new();
    for page in 1..=2 {
        let req = test::TestRequest::get()
            .uri(&format!("/api/posts?currentPage={page}&pageSize=10"))
            .to_request();
        let res = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(res).await;
        for id in body["posts"].as_object().unwrap().keys() {
            assert!(seen.insert(id.clone()), "post {id} appeared twice");
        }
    }
    assert_eq!(seen.len(), 15);
}

#[actix_web::test]
async fn concurrent_likes_from_distinct_users_converge_without_loss() {
    let (_pg, pg_url) = start_postgres().await;
    let state = build_state(&pg_url).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config())
            .configure(api_routes),
    )
    .await;

    let author = register_user(&app, "A", "a@x.com", "secret123").await;
    let post_id: Uuid = create_post(&app, &author, "hello").await.parse().unwrap();

    // N distinct users like the same post at the same time, straight against
    // the engine so the calls genuinely overlap.
    let user_ids: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();
    let tasks = user_ids.iter().map(|user_id| {
        let service = PostService::new(state.db.clone(), Duration::from_secs(5));
        let user_id = *user_id;
        tokio::spawn(async move { service.like(post_id, user_id).await })
    });
    for result in join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let post = fetch_post(&app, &author, &post_id.to_string()).await;
    let likes: Vec<String> = post["likes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|id| id.as_str().unwrap().to_string())
        .collect();
    assert_eq!(likes.len(), 8, "no lost updates");
    let unique: HashSet<&String> = likes.iter().collect();
    assert_eq!(unique.len(), 8, "no duplicate liker entries");
}
