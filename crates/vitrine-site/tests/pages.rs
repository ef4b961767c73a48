use serde_json::{json, Value};
use vitrine_client::PublicClient;
use vitrine_common::models::ProjectStatus;
use vitrine_site::views::SERVICE_PLACEHOLDER_URL;
use vitrine_site::Site;
use vitrine_testkit::{unreachable_base_url, MockBackend, Reply};

fn site(backend: &MockBackend) -> Site {
    Site::new(PublicClient::new(&backend.base_url(), &backend.upload_base(), None).unwrap())
}

fn post(id: i64) -> Value {
    json!({
        "id": id,
        "title": format!("Post {id}"),
        "excerpt": null,
        "content": "Body text",
        "image_path": null,
        "author": "Ann",
        "category": null,
        "is_published": true,
        "published_at": "2024-05-01T10:00:00",
    })
}

fn service(id: i64, image: &str) -> Value {
    json!({
        "id": id,
        "title": "Survey",
        "description": "Land survey",
        "image_path": image,
        "images": null,
        "video_url": null,
        "order": 0,
        "is_active": true,
    })
}

#[tokio::test]
async fn home_loads_every_section() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/api/carousel",
        Reply::json(json!([{ "id": 1, "title": "Hi", "image_path": "carousel/a.png", "order": 0, "is_active": true }])),
    );
    backend.on("GET", "/api/services", Reply::json(json!([service(1, "services/default-placeholder.jpg")])));
    backend.on("GET", "/api/blog", Reply::json(json!([post(1), post(2), post(3), post(4)])));
    backend.on(
        "GET",
        "/api/statistics",
        Reply::json(json!([{ "id": 1, "label": "Projects", "value": 12, "icon": null, "order": 0, "is_active": true }])),
    );
    backend.on(
        "GET",
        "/api/about",
        Reply::json(json!([{ "id": 1, "title": "Who we are", "image_path": "https://img.test/a.png", "is_active": true }])),
    );
    backend.on("GET", "/api/faqs", Reply::json(json!([])));

    let home = site(&backend).home().await;

    assert_eq!(home.slides[0].image_url, format!("{}/carousel/a.png", backend.upload_base()));
    assert_eq!(home.services[0].image_url, SERVICE_PLACEHOLDER_URL);
    assert_eq!(home.posts.len(), 3);
    assert_eq!(home.posts[0].excerpt, "Body text");
    assert_eq!(home.posts[0].date.as_deref(), Some("2024-05-01"));
    assert_eq!(home.statistics[0].icon, "flaticon-worker");
    assert_eq!(home.about.unwrap().image_url.as_deref(), Some("https://img.test/a.png"));
    assert!(home.faqs.is_empty());
    assert_eq!(backend.request_count(), 6);
}

#[tokio::test]
async fn home_without_backend_is_empty() {
    let client = PublicClient::new(&unreachable_base_url(), "http://127.0.0.1:9/uploads", None).unwrap();

    let home = Site::new(client).home().await;

    assert!(home.slides.is_empty());
    assert!(home.services.is_empty());
    assert!(home.posts.is_empty());
    assert_eq!(home.about, None);
}

#[tokio::test]
async fn portfolio_page_keeps_its_filter() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/api/portfolio",
        Reply::json(json!([{
            "id": 4,
            "title": "Bridge",
            "description": null,
            "image_path": "portfolio/bridge.png",
            "status": "completed",
            "order": 0,
            "is_active": true,
        }])),
    );

    let page = site(&backend).portfolio(Some(ProjectStatus::Completed)).await;

    assert_eq!(page.filter, Some(ProjectStatus::Completed));
    assert_eq!(page.projects[0].status, ProjectStatus::Completed);
    let req = &backend.requests()[0];
    assert_eq!(req.query.get("status_filter").map(String::as_str), Some("completed"));
}

#[tokio::test]
async fn contact_items_get_type_icons() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/api/contact/info",
        Reply::json(json!([
            { "id": 1, "type": "email", "label": "Mail", "value": "hi@example.com", "icon": null, "order": 0, "is_active": true },
            { "id": 2, "type": "phone", "label": "Call", "value": "+1 555", "icon": "custom-icon", "order": 1, "is_active": true },
        ])),
    );

    let items = site(&backend).contact().await;

    assert_eq!(items[0].icon, "flaticon-send-mail");
    assert_eq!(items[1].icon, "custom-icon");
}

#[tokio::test]
async fn single_service_is_found_among_active_ones() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/api/services",
        Reply::json(json!([service(1, "services/a.png"), service(2, "services/b.png")])),
    );
    let site = site(&backend);

    let found = site.service(2).await.unwrap();

    assert_eq!(found.gallery, [format!("{}/services/b.png", backend.upload_base())]);
    assert!(site.service(9).await.is_none());
}
