mod common;

use serde_json::{json, Value};
use vitrine_admin::resources::{ServiceForm, VideoInput};
use vitrine_admin::ResourceController;
use vitrine_client::Upload;
use vitrine_common::models::Service;
use vitrine_testkit::Reply;

use common::{harness, service, Harness};

fn images_json(h: &Harness, path: &str) -> Value {
    let req = &h.backend.requests_to("PUT", path)[0];
    let raw = req.field("images_json").and_then(|f| f.text.clone()).unwrap();
    serde_json::from_str(&raw).unwrap()
}

async fn editing(h: &Harness, record: Value) -> ResourceController<Service> {
    h.backend.on("GET", "/api/services/3", Reply::json(record.clone()));
    h.backend.on("PUT", "/api/services/3", Reply::json(record.clone()));
    h.backend.on("PUT", "/api/services/3/images", Reply::json(record.clone()));
    h.backend.on("PUT", "/api/services/3/video", Reply::json(record.clone()));
    h.backend.on("GET", "/api/services", Reply::json(json!([record])));
    let ctl = ResourceController::<Service>::new(h.ctx.clone());
    ctl.open_edit(3).await.unwrap();
    ctl
}

#[tokio::test]
async fn untouched_edit_sends_only_metadata() {
    let h = harness(true).await;
    let ctl = editing(
        &h,
        service(3, json!("[\"services/a.png\",\"services/b.png\"]"), json!("https://youtu.be/xyz")),
    )
    .await;

    ctl.submit().await.unwrap();

    let writes: Vec<String> = h
        .backend
        .requests()
        .into_iter()
        .filter(|r| r.method != "GET")
        .map(|r| r.path)
        .collect();
    assert_eq!(writes, ["/api/services/3"]);
}

#[tokio::test]
async fn gallery_edit_merges_kept_and_uploaded() {
    let h = harness(true).await;
    h.backend.on(
        "POST",
        "/api/services/upload-images",
        Reply::json(json!(["services/c.png"])),
    );
    let ctl = editing(&h, service(3, json!("services/a.png, services/b.png"), Value::Null)).await;
    ctl.edit_form(|f: &mut ServiceForm| {
        assert_eq!(f.gallery_existing.len(), 2);
        assert!(f.remove_gallery_image("services/a.png"));
        f.add_gallery_image(Upload::new("c.png", vec![3]));
    });

    ctl.submit().await.unwrap();

    let upload = &h.backend.requests_to("POST", "/api/services/upload-images")[0];
    assert_eq!(upload.field_names(), ["images"]);
    assert_eq!(images_json(&h, "/api/services/3/images"), json!(["services/b.png", "services/c.png"]));
    assert!(h.backend.requests_to("PUT", "/api/services/3/video").is_empty());
    assert_eq!(h.backend.requests_to("PUT", "/api/services/3").len(), 1);
}

#[tokio::test]
async fn clearing_loaded_video_sends_explicit_removal() {
    let h = harness(true).await;
    let ctl = editing(&h, service(3, Value::Null, json!("services/videos/intro.mp4"))).await;
    ctl.edit_form(|f: &mut ServiceForm| {
        assert_eq!(f.video, VideoInput::Keep);
        f.clear_video();
    });

    ctl.submit().await.unwrap();

    let video = &h.backend.requests_to("PUT", "/api/services/3/video")[0];
    assert_eq!(video.field_names(), ["video_url"]);
    assert_eq!(video.field("video_url").unwrap().text.as_deref(), Some(""));
}

#[tokio::test]
async fn choosing_a_file_replaces_an_external_video() {
    let h = harness(true).await;
    let ctl = editing(&h, service(3, Value::Null, json!("https://vimeo.com/9"))).await;
    ctl.edit_form(|f: &mut ServiceForm| f.set_video_file(Upload::new("clip.mp4", vec![0, 1])));

    ctl.submit().await.unwrap();

    let video = &h.backend.requests_to("PUT", "/api/services/3/video")[0];
    assert_eq!(video.field_names(), ["video_file"]);
    assert_eq!(video.field("video_file").unwrap().file_name.as_deref(), Some("clip.mp4"));
}

#[tokio::test]
async fn create_uploads_gallery_first_and_sends_one_create() {
    let h = harness(true).await;
    h.backend.on(
        "POST",
        "/api/services/upload-images",
        Reply::json(json!(["services/x.png", "services/y.png"])),
    );
    h.backend.on("POST", "/api/services", Reply::created(service(8, Value::Null, Value::Null)));
    h.backend.on("GET", "/api/services", Reply::json(json!([])));
    let ctl = ResourceController::<Service>::new(h.ctx.clone());
    ctl.open_create();
    ctl.edit_form(|f: &mut ServiceForm| {
        f.title = "Mapping".into();
        f.add_gallery_image(Upload::new("x.png", vec![1]));
        f.add_gallery_image(Upload::new("y.png", vec![2]));
        f.set_video_url("https://youtu.be/abc");
    });

    ctl.submit().await.unwrap();

    let order: Vec<String> = h.backend.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(order, ["/api/services/upload-images", "/api/services", "/api/services"]);
    let create = &h.backend.requests_to("POST", "/api/services")[0];
    assert_eq!(
        create.field_names(),
        ["title", "order", "is_active", "images_json", "video_url"]
    );
    let gallery: Value =
        serde_json::from_str(create.field("images_json").unwrap().text.as_deref().unwrap()).unwrap();
    assert_eq!(gallery, json!(["services/x.png", "services/y.png"]));
}

#[tokio::test]
async fn placeholder_and_video_show_as_badges() {
    let h = harness(true).await;
    let mut record = service(3, Value::Null, json!("https://youtu.be/xyz"));
    record["image_path"] = json!("services/default-placeholder.jpg");
    h.backend.on("GET", "/api/services", Reply::json(json!([record])));
    let ctl = ResourceController::<Service>::new(h.ctx.clone());

    ctl.list().await.unwrap();

    let badges = &ctl.cards()[0].badges;
    assert!(badges.contains(&"Video".to_owned()));
    assert!(badges.contains(&"Placeholder image".to_owned()));
}
