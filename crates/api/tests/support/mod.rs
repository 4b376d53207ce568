//! Shared helpers for `bizkit-api` integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use bizkit_api::{build_router, AppContext};
use bizkit_core::{IdentityProvider, ProfileStore, ProfileWrite};
use bizkit_domain::{BizkitError, BusinessProfile, Config, ProfileDraft, Result};
use bizkit_infra::{FixedIdentityProvider, InMemoryProfileStore, JwtIdentityProvider};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const OWNER: &str = "test-user-id";
pub const JWT_SECRET: &str = "route-test-secret";

/// Router over an in-memory store with the fixed development identity.
pub fn fixed_identity_router() -> Router {
    router_with(Arc::new(InMemoryProfileStore::new()), Arc::new(FixedIdentityProvider::new(OWNER)))
}

/// Router over an in-memory store that requires HS256 tokens.
pub fn jwt_router() -> Router {
    router_with(Arc::new(InMemoryProfileStore::new()), Arc::new(JwtIdentityProvider::new(JWT_SECRET)))
}

pub fn router_with(store: Arc<dyn ProfileStore>, identity: Arc<dyn IdentityProvider>) -> Router {
    let ctx = AppContext::from_parts(Config::default(), store, None, identity);
    build_router(Arc::new(ctx))
}

/// Minimal valid body for the "Joe's Cafe" profile.
pub fn joes_cafe() -> Value {
    json!({
        "name": "Joe's Cafe",
        "category": "Food & Beverage",
        "description": "Coffee shop",
        "location": "Austin, TX",
        "contactNumber": "555-0100"
    })
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).expect("request builds")
}

/// Send one request and decode the JSON reply.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body reads");
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json body") };
    (status, body)
}

/// Store whose backend is always unreachable.
pub struct UnreachableStore;

#[async_trait]
impl ProfileStore for UnreachableStore {
    async fn upsert(&self, _owner_id: &str, _draft: ProfileDraft) -> Result<ProfileWrite> {
        Err(BizkitError::Storage("connection refused".into()))
    }

    async fn find_by_owner(&self, _owner_id: &str) -> Result<Option<BusinessProfile>> {
        Err(BizkitError::Storage("connection refused".into()))
    }

    async fn delete_by_owner(&self, _owner_id: &str) -> Result<bool> {
        Err(BizkitError::Storage("connection refused".into()))
    }

    async fn health_check(&self) -> Result<()> {
        Err(BizkitError::Storage("connection refused".into()))
    }

    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}
