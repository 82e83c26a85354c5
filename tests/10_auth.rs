mod common;

use anyhow::Result;
use chrono::Utc;
use reqwest::{Method, StatusCode};
use serde_json::json;

use common::{token_for, TestServer, JWT_SECRET};
use filmrec_api::auth::{Claims, JwtKeys};

#[tokio::test]
async fn missing_token_is_rejected() -> Result<()> {
    let server = TestServer::without_database().await?;

    let (status, body) = server.call(Method::GET, "/movies", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is missing!");
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn malformed_token_is_rejected() -> Result<()> {
    let server = TestServer::without_database().await?;

    let (status, body) = server.call(Method::GET, "/genres", Some("not.a.jwt"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is invalid!");

    let response = server
        .client
        .get(server.url("/genres"))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn expired_and_foreign_tokens_share_a_message() -> Result<()> {
    let server = TestServer::without_database().await?;

    let now = Utc::now().timestamp();
    let expired = JwtKeys::new(JWT_SECRET, 1).encode_claims(&Claims {
        sub: "2".to_string(),
        user_id: 2,
        iat: now - 7200,
        exp: now - 3600,
    })?;
    let foreign = JwtKeys::new("someone-elses-secret", 1).issue(2)?;

    for token in [expired, foreign] {
        let (status, body) = server.call(Method::GET, "/watch-history", Some(&token), None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Token is invalid!");
    }
    Ok(())
}

#[tokio::test]
async fn every_protected_route_requires_a_token() -> Result<()> {
    let server = TestServer::without_database().await?;

    let routes = [
        (Method::GET, "/users"),
        (Method::GET, "/users/2"),
        (Method::POST, "/movies"),
        (Method::DELETE, "/movies/1"),
        (Method::GET, "/movies/filter"),
        (Method::GET, "/movies/top"),
        (Method::GET, "/genres/statistics"),
        (Method::GET, "/genres/top-rated-movie"),
        (Method::POST, "/movie-genre"),
        (Method::GET, "/movies/1/ratings"),
        (Method::PUT, "/ratings/1"),
        (Method::DELETE, "/reviews/1"),
        (Method::POST, "/watch-history"),
        (Method::GET, "/recommendations"),
        (Method::DELETE, "/recommendations/2/1"),
    ];

    for (method, path) in routes {
        let (status, _) = server.call(method.clone(), path, None, None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, path);
    }
    Ok(())
}

#[tokio::test]
async fn public_routes_need_no_token() -> Result<()> {
    let server = TestServer::without_database().await?;

    let (status, body) = server.call(Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Film Recommendation Project API!");

    let (status, body) = server.call(Method::GET, "/openapi.json", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/login"].is_object());
    Ok(())
}

#[tokio::test]
async fn health_reports_unreachable_database() -> Result<()> {
    let server = TestServer::without_database().await?;

    let (status, body) = server.call(Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_404() -> Result<()> {
    let server = TestServer::without_database().await?;

    let (status, body) = server.call(Method::GET, "/nope", Some(&token_for(2)), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);
    Ok(())
}

#[tokio::test]
async fn registration_fields_are_validated_before_storage() -> Result<()> {
    let server = TestServer::without_database().await?;

    let cases = [
        (json!({ "user_name": "bob", "email": "bob@example.com", "password": "pw" }), "user_name"),
        (json!({ "user_name": "bobby", "email": "bob-at-example", "password": "pw" }), "email"),
        (json!({ "user_name": "bobby", "email": "bob@example.com", "password": "" }), "password"),
    ];

    for (body, field) in cases {
        let (status, response) = server.call(Method::POST, "/register", None, Some(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", field);
        assert!(response["field_errors"][field].is_string(), "{}", response);
    }

    let (status, response) = server
        .call(Method::POST, "/register", None, Some(json!({ "user_name": "bobby" })))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "VALIDATION_ERROR");
    Ok(())
}
