mod common;

use std::sync::Arc;

use serde_json::json;
use vitrine_admin::{AdminShell, DashboardCounts, SessionState};
use vitrine_client::MemoryTokenStore;
use vitrine_common::models::{Faq, ResourceKind};
use vitrine_testkit::Reply;

use common::{faq, harness, harness_with_store, service, slide, submission, user};

#[tokio::test]
async fn registration_is_idempotent() {
    let h = harness(true).await;
    let shell = AdminShell::new(h.ctx.clone());

    let first = shell.register::<Faq>();
    let second = shell.register::<Faq>();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(shell.section_kinds(), [ResourceKind::Faqs]);

    shell.register_all();
    shell.register_all();
    assert_eq!(shell.section_kinds().len(), ResourceKind::ALL.len());
    assert!(Arc::ptr_eq(&first, &shell.controller::<Faq>()));
}

#[tokio::test]
async fn navigation_requires_a_session() {
    let h = harness_with_store(true, MemoryTokenStore::new()).await;
    let shell = AdminShell::new(h.ctx.clone());
    shell.register_all();

    assert_eq!(shell.start().await, SessionState::Unauthenticated);
    assert!(shell.navigate(ResourceKind::Faqs).await.is_err());

    assert_eq!(h.backend.request_count(), 0);
    assert_eq!(shell.current_section(), None);
}

#[tokio::test]
async fn each_visit_lists_afresh() {
    let h = harness(true).await;
    h.backend.on("GET", "/api/auth/me", Reply::json(user()));
    h.backend.on("GET", "/api/faqs", Reply::json(json!([faq(1), faq(2)])));
    h.backend.on("GET", "/api/carousel", Reply::json(json!([])));
    h.backend.on("GET", "/api/services", Reply::json(json!([])));
    h.backend.on("GET", "/api/portfolio", Reply::json(json!([])));
    h.backend.on("GET", "/api/contact/submissions", Reply::json(json!([])));
    let shell = AdminShell::new(h.ctx.clone());
    shell.register_all();
    shell.start().await;
    h.backend.clear_requests();

    assert_eq!(shell.navigate(ResourceKind::Faqs).await.unwrap(), 2);
    assert_eq!(shell.navigate(ResourceKind::Carousel).await.unwrap(), 0);
    assert_eq!(shell.navigate(ResourceKind::Faqs).await.unwrap(), 2);

    assert_eq!(h.backend.requests_to("GET", "/api/faqs").len(), 2);
    assert_eq!(shell.current_section(), Some(ResourceKind::Faqs));
    let section = shell.section(ResourceKind::Faqs).unwrap();
    assert_eq!(section.cards().len(), 2);
}

#[tokio::test]
async fn unregistered_section_is_an_error() {
    let h = harness(true).await;
    h.backend.on("GET", "/api/auth/me", Reply::json(user()));
    h.backend.on("GET", "/api/carousel", Reply::json(json!([])));
    h.backend.on("GET", "/api/services", Reply::json(json!([])));
    h.backend.on("GET", "/api/portfolio", Reply::json(json!([])));
    h.backend.on("GET", "/api/contact/submissions", Reply::json(json!([])));
    let shell = AdminShell::new(h.ctx.clone());
    shell.start().await;

    let err = shell.navigate(ResourceKind::Licenses).await.unwrap_err();

    assert!(err.to_string().contains("licenses"));
}

#[tokio::test]
async fn login_loads_dashboard_counts() {
    let h = harness_with_store(true, MemoryTokenStore::new()).await;
    h.backend.on(
        "POST",
        "/api/auth/login/json",
        Reply::json(json!({ "access_token": "t", "token_type": "bearer" })),
    );
    h.backend.on("GET", "/api/auth/me", Reply::json(user()));
    h.backend.on("GET", "/api/carousel", Reply::json(json!([slide(1, "A", "a.png"), slide(2, "B", "b.png")])));
    h.backend.on("GET", "/api/services", Reply::json(json!([service(1, json!(null), json!(null))])));
    h.backend.on("GET", "/api/portfolio", Reply::json(json!([])));
    h.backend.on(
        "GET",
        "/api/contact/submissions",
        Reply::json(json!([submission(1, false), submission(2, false), submission(3, false)])),
    );
    let shell = AdminShell::new(h.ctx.clone());

    shell.login("admin", "pw").await.unwrap();

    assert_eq!(
        shell.dashboard(),
        Some(DashboardCounts {
            active_carousel: 2,
            active_services: 1,
            active_portfolio: 0,
            unread_submissions: 3,
        })
    );
    let unread = &h.backend.requests_to("GET", "/api/contact/submissions")[0];
    assert_eq!(unread.query.get("unread_only").map(String::as_str), Some("true"));
    let carousel = &h.backend.requests_to("GET", "/api/carousel")[0];
    assert_eq!(carousel.query.get("active_only").map(String::as_str), Some("true"));
}

#[tokio::test]
async fn dashboard_failure_does_not_block_the_session() {
    let h = harness(true).await;
    h.backend.on("GET", "/api/auth/me", Reply::json(user()));
    h.backend.on("GET", "/api/carousel", Reply::json(json!([])));
    h.backend.on("GET", "/api/services", Reply::detail(500, "boom"));
    h.backend.on("GET", "/api/portfolio", Reply::json(json!([])));
    h.backend.on("GET", "/api/contact/submissions", Reply::json(json!([])));
    let shell = AdminShell::new(h.ctx.clone());

    let state = shell.start().await;

    assert!(matches!(state, SessionState::Authenticated(_)));
    assert_eq!(shell.dashboard(), None);
    assert!(shell.session().is_authenticated());
}

#[tokio::test]
async fn resume_checks_the_session_only() {
    let h = harness(true).await;
    h.backend.on("GET", "/api/auth/me", Reply::json(user()));
    let shell = AdminShell::new(h.ctx.clone());
    shell.register_all();

    let state = shell.resume().await;

    assert!(matches!(state, SessionState::Authenticated(_)));
    let paths: Vec<_> = h.backend.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, ["/api/auth/me"]);
    assert_eq!(shell.dashboard(), None);
}

#[tokio::test]
async fn logout_forgets_section_and_dashboard() {
    let h = harness(true).await;
    h.backend.on("GET", "/api/auth/me", Reply::json(user()));
    for path in ["/api/carousel", "/api/services", "/api/portfolio", "/api/contact/submissions", "/api/faqs"] {
        h.backend.on("GET", path, Reply::json(json!([])));
    }
    let shell = AdminShell::new(h.ctx.clone());
    shell.register_all();
    shell.start().await;
    shell.navigate(ResourceKind::Faqs).await.unwrap();
    assert!(shell.dashboard().is_some());

    shell.logout().unwrap();

    assert_eq!(shell.current_section(), None);
    assert_eq!(shell.dashboard(), None);
    assert!(shell.navigate(ResourceKind::Faqs).await.is_err());
}
