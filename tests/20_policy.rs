mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::json;

use common::{token_for, TestServer};
use filmrec_api::auth::ADMIN_USER_ID;

// Every request here is refused before any query runs, so the unreachable
// database is never touched.

#[tokio::test]
async fn catalogue_mutation_requires_admin() -> Result<()> {
    let server = TestServer::without_database().await?;
    let token = token_for(2);

    let requests = [
        (Method::POST, "/movies", Some(json!({ "title": "Heat" }))),
        (Method::PUT, "/movies/1", Some(json!({ "title": "Heat" }))),
        (Method::DELETE, "/movies/1", None),
        (Method::POST, "/genres", Some(json!({ "genre_name": "Action" }))),
        (Method::PUT, "/genres/1", Some(json!({ "genre_name": "Drama" }))),
        (Method::DELETE, "/genres/1", None),
        (Method::POST, "/movie-genre", Some(json!({ "movie_id": 1, "genre_id": 1 }))),
        (Method::DELETE, "/movie-genre", Some(json!({ "movie_id": 1, "genre_id": 1 }))),
        (Method::POST, "/recommendations", Some(json!({ "user_id": 3, "movie_id": 1 }))),
        (Method::DELETE, "/recommendations/3/1", None),
    ];

    for (method, path, body) in requests {
        let (status, response) = server.call(method.clone(), path, Some(&token), body).await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, path);
        assert_eq!(response["message"], "Access denied");
        assert_eq!(response["code"], "FORBIDDEN");
    }
    Ok(())
}

#[tokio::test]
async fn profiles_are_owner_only() -> Result<()> {
    let server = TestServer::without_database().await?;
    let token = token_for(2);

    let (status, body) = server.call(Method::GET, "/users/3", Some(&token), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied");

    let (status, _) = server
        .call(
            Method::PUT,
            "/users/3",
            Some(&token),
            Some(json!({ "user_name": "mallory", "email": "m@example.com" })),
        )
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = server.call(Method::DELETE, "/users/3", Some(&token), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The admin is no exception
    let (status, _) = server
        .call(Method::GET, "/users/3", Some(&token_for(ADMIN_USER_ID)), None)
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admin_account_cannot_be_deleted() -> Result<()> {
    let server = TestServer::without_database().await?;

    let (status, body) = server
        .call(Method::DELETE, "/users/1", Some(&token_for(ADMIN_USER_ID)), None)
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin user cannot be deleted");
    Ok(())
}

#[tokio::test]
async fn invalid_bodies_are_400() -> Result<()> {
    let server = TestServer::without_database().await?;
    let token = token_for(2);

    let (status, body) = server
        .call(Method::POST, "/ratings", Some(&token), Some(json!({ "movie_id": 1, "score": 7 })))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["score"].is_string());

    let (status, _) = server
        .call(Method::POST, "/ratings", Some(&token), Some(json!({ "movie_id": "one", "score": 4 })))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server.call(Method::GET, "/movies/filter", Some(&token), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .call(
            Method::GET,
            "/movies/top",
            Some(&token),
            Some(json!({ "genre_name": "Action", "limit": 0 })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["limit"].is_string());

    let (status, _) = server
        .call(
            Method::GET,
            "/movies/filter",
            Some(&token),
            Some(json!({ "genre_name": "Action", "min_duration": 200, "max_duration": 100, "min_rating": 0 })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .call(
            Method::POST,
            "/movies",
            Some(&token_for(ADMIN_USER_ID)),
            Some(json!({ "title": "   " })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unparseable_path_ids_are_json_400() -> Result<()> {
    let server = TestServer::without_database().await?;
    let admin = token_for(ADMIN_USER_ID);

    let requests = [
        (Method::GET, "/movies/abc"),
        (Method::DELETE, "/genres/1.5"),
        (Method::GET, "/users/99999999999"),
        (Method::GET, "/movies/x/ratings"),
        (Method::DELETE, "/reviews/-"),
        (Method::DELETE, "/recommendations/abc/1"),
    ];

    for (method, path) in requests {
        let response = server.request(method.clone(), path, Some(&admin)).send().await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", method, path);
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"), "{} {}: {}", method, path, content_type);

        let body: serde_json::Value = response.json().await?;
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
    Ok(())
}
