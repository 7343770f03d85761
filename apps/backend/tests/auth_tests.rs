mod support;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use backend_test_support::tokens::TokenBuilder;
use backend_test_support::unique_helpers::unique_subject;
use profile_backend::routes::messages::{PRIVATE_MESSAGE, PRIVATE_SCOPED_MESSAGE, PUBLIC_MESSAGE};
use serde_json::Value;
use support::{build_test_state, create_test_app, MockIdp};

fn challenge(resp: &actix_web::dev::ServiceResponse) -> Option<String> {
    resp.headers()
        .get(header::WWW_AUTHENTICATE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[actix_web::test]
async fn public_endpoint_needs_no_token() {
    let idp = MockIdp::start().await;
    let app = create_test_app(build_test_state(&idp).await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/public").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], PUBLIC_MESSAGE);
}

#[actix_web::test]
async fn private_endpoint_without_token_is_401() {
    let idp = MockIdp::start().await;
    let app = create_test_app(build_test_state(&idp).await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/private").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(challenge(&resp).as_deref(), Some("Bearer"));
    assert!(resp.headers().contains_key("x-trace-id"));
    assert!(resp.headers().contains_key("x-request-id"));
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn rejected_tokens_are_401_invalid_token() {
    let idp = MockIdp::start().await;
    let app = create_test_app(build_test_state(&idp).await)
        .with_prod_routes()
        .build()
        .await;
    let sub = unique_subject("auth0");

    let cases = [
        ("not a bearer header", "Token abc".to_string()),
        ("garbage token", "Bearer not.a.jwt".to_string()),
        ("expired", TokenBuilder::new(&sub).expired().bearer()),
        ("foreign signature", TokenBuilder::new(&sub).signed_by_rogue_key().bearer()),
        (
            "wrong audience",
            TokenBuilder::new(&sub).audience("https://other.example").bearer(),
        ),
        (
            "wrong issuer",
            TokenBuilder::new(&sub).issuer("https://evil.example/").bearer(),
        ),
    ];

    for (name, authorization) in cases {
        let req = test::TestRequest::get()
            .uri("/api/private")
            .insert_header((header::AUTHORIZATION, authorization))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "case: {name}");
        assert_eq!(
            challenge(&resp).as_deref(),
            Some(r#"Bearer error="invalid_token""#),
            "case: {name}"
        );
    }
}

#[actix_web::test]
async fn private_endpoint_with_valid_token_is_200() {
    let idp = MockIdp::start().await;
    let app = create_test_app(build_test_state(&idp).await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/api/private")
        .insert_header((header::AUTHORIZATION, TokenBuilder::new("auth0|alice").bearer()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], PRIVATE_MESSAGE);
}

#[actix_web::test]
async fn scoped_endpoint_requires_read_messages() {
    let idp = MockIdp::start().await;
    let app = create_test_app(build_test_state(&idp).await)
        .with_prod_routes()
        .build()
        .await;

    let without_scope = test::TestRequest::get()
        .uri("/api/private-scoped")
        .insert_header((
            header::AUTHORIZATION,
            TokenBuilder::new("auth0|alice").scope("openid profile").bearer(),
        ))
        .to_request();
    let resp = test::call_service(&app, without_scope).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        challenge(&resp).as_deref(),
        Some(r#"Bearer error="insufficient_scope", scope="read:messages""#)
    );

    let with_scope = test::TestRequest::get()
        .uri("/api/private-scoped")
        .insert_header((
            header::AUTHORIZATION,
            TokenBuilder::new("auth0|alice")
                .scope("openid read:messages")
                .bearer(),
        ))
        .to_request();
    let resp = test::call_service(&app, with_scope).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], PRIVATE_SCOPED_MESSAGE);
}

#[actix_web::test]
async fn users_endpoints_are_guarded_before_any_provider_call() {
    let idp = MockIdp::start().await;
    idp.token_exchange(200, 0).await;
    let app = create_test_app(build_test_state(&idp).await)
        .with_prod_routes()
        .build()
        .await;

    let get = test::TestRequest::get().uri("/api/users/get_user/").to_request();
    assert_eq!(test::call_service(&app, get).await.status(), StatusCode::UNAUTHORIZED);

    let post = test::TestRequest::post()
        .uri("/api/users/update_profile/")
        .set_form([("first_name", "A"), ("last_name", "B"), ("email", "a@b.com")])
        .to_request();
    assert_eq!(test::call_service(&app, post).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn signing_keys_are_fetched_once_across_requests() {
    let idp = MockIdp::start_without_keys().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/.well-known/jwks.json"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(backend_test_support::tokens::jwks_json()),
        )
        .expect(1)
        .mount(&idp.server)
        .await;
    let app = create_test_app(build_test_state(&idp).await)
        .with_prod_routes()
        .build()
        .await;

    for _ in 0..3 {
        let req = test::TestRequest::get()
            .uri("/api/private")
            .insert_header((header::AUTHORIZATION, TokenBuilder::new("auth0|alice").bearer()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}

#[actix_web::test]
async fn unreachable_signing_keys_are_a_server_error() {
    let idp = MockIdp::start_without_keys().await;
    let app = create_test_app(build_test_state(&idp).await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/api/private")
        .insert_header((header::AUTHORIZATION, TokenBuilder::new("auth0|alice").bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(challenge(&resp).is_none());
}

#[actix_web::test]
async fn rejection_reuses_inbound_request_id_as_trace_id() {
    let idp = MockIdp::start().await;
    let app = create_test_app(build_test_state(&idp).await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/api/private")
        .insert_header(("x-request-id", "lb-req-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "lb-req-42");
    assert_eq!(resp.headers().get("x-trace-id").unwrap(), "lb-req-42");
}
