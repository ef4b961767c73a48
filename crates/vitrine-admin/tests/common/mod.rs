#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use vitrine_admin::{AdminContext, Confirm, NoticeLog};
use vitrine_client::{ApiClient, MemoryTokenStore};
use vitrine_common::MediaResolver;
use vitrine_testkit::MockBackend;

/// Confirmation stub that answers a fixed value and counts prompts.
#[derive(Clone)]
pub struct Answer {
    pub yes: bool,
    pub asked: Arc<AtomicUsize>,
}

impl Answer {
    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.yes
    }
}

pub struct Harness {
    pub backend: MockBackend,
    pub store: MemoryTokenStore,
    pub log: NoticeLog,
    pub answer: Answer,
    pub ctx: AdminContext,
}

pub async fn harness(confirm: bool) -> Harness {
    harness_with_store(confirm, MemoryTokenStore::with_token("tok")).await
}

pub async fn harness_with_store(confirm: bool, store: MemoryTokenStore) -> Harness {
    let backend = MockBackend::start().await;
    let api = ApiClient::new(&backend.base_url(), Arc::new(store.clone()), None).unwrap();
    let log = NoticeLog::new();
    let answer = Answer { yes: confirm, asked: Arc::new(AtomicUsize::new(0)) };
    let ctx = AdminContext::new(
        api,
        MediaResolver::new(backend.upload_base()),
        Arc::new(log.clone()),
        Arc::new(answer.clone()),
    );
    Harness { backend, store, log, answer, ctx }
}

pub fn slide(id: i64, title: &str, image: &str) -> Value {
    json!({
        "id": id, "title": title, "subtitle": "Sub", "image_path": image,
        "button_text": null, "button_link": null, "order": id, "is_active": true,
        "created_at": "2024-03-01T10:00:00", "updated_at": null
    })
}

pub fn faq(id: i64) -> Value {
    json!({ "id": id, "question": format!("Q{id}?"), "answer": "A.", "order": 0, "is_active": true })
}

pub fn service(id: i64, images: Value, video: Value) -> Value {
    json!({
        "id": id, "title": "Survey", "description": "Land survey", "image_path": "services/main.png",
        "images": images, "video_url": video, "order": 1, "is_active": true
    })
}

pub fn submission(id: i64, is_read: bool) -> Value {
    json!({
        "id": id, "name": "Ana", "email": "ana@example.com", "subject": "Quote",
        "message": "Hello", "is_read": is_read, "created_at": "2024-05-06T07:08:09"
    })
}

pub fn user() -> Value {
    json!({ "id": 1, "username": "admin", "email": "admin@example.com", "is_active": true, "is_superuser": true })
}
