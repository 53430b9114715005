//! HTTP-level tests for per-entity resources against the mock backend.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{MockBackend, MockState, Seen};
use planboard_client::{ClientError, Resource};
use planboard_core::attachment::Attachment;
use planboard_core::entities::{
    Host, HostForm, OnlinePlanner, Podcast, PodcastForm, Quote, QuoteForm, UploadLinkForm,
    VideoIdea, VideoIdeaForm,
};
use planboard_core::types::Date;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> Date {
    date(2026, 6, 1)
}

fn podcast() -> PodcastForm {
    PodcastForm {
        title: "Eps 1".into(),
        host: "Rina".into(),
        speaker: "Dimas".into(),
        theme: None,
        shoot_date: Some(date(2026, 6, 2)),
        upload_date: Some(date(2026, 6, 9)),
        status: "scheduled".into(),
        link: None,
    }
}

// ---------------------------------------------------------------------------
// Test: list accepts bare arrays and data envelopes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_reads_bare_array() {
    let backend = MockBackend::start().await;
    backend.seed("host", vec![json!({ "name": "Rina" }), json!({ "name": "Dimas" })]);

    let hosts = Resource::<Host>::new(backend.api()).list().await.unwrap();
    assert_eq!(hosts.len(), 2);
    assert_eq!(hosts[0].fields.name, "Rina");
    assert_eq!(backend.seen(), vec![Seen { method: "GET".into(), path: "/api/host".into() }]);
}

#[tokio::test]
async fn list_reads_data_envelope() {
    let backend = MockBackend::start_with(MockState {
        wrap_lists: true,
        ..MockState::default()
    })
    .await;
    backend.seed(
        "quote",
        vec![json!({
            "quote": "Stay curious",
            "author": "Team",
            "upload_date": "2026-06-01",
            "status": "scheduled"
        })],
    );

    let quotes = Resource::<Quote>::new(backend.api()).list().await.unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].fields.upload_date, Some(today()));
}

#[tokio::test]
async fn empty_collection_lists_nothing() {
    let backend = MockBackend::start().await;
    let podcasts = Resource::<Podcast>::new(backend.api()).list().await.unwrap();
    assert!(podcasts.is_empty());
}

// ---------------------------------------------------------------------------
// Test: create validates before sending
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_form_never_reaches_backend() {
    let backend = MockBackend::start().await;
    let resource = Resource::<Podcast>::new(backend.api()).with_today(today());

    let form = PodcastForm {
        title: String::new(),
        ..podcast()
    };
    let err = resource.create(&form).await.unwrap_err();
    assert_matches!(&err, ClientError::Validation(errors) if errors.has("title"));
    assert!(backend.seen().is_empty());
}

#[tokio::test]
async fn create_posts_json_and_returns_record() {
    let backend = MockBackend::start().await;
    let resource = Resource::<Podcast>::new(backend.api()).with_today(today());

    let created = resource.create(&podcast()).await.unwrap().unwrap();
    assert_eq!(created.fields.title, "Eps 1");
    assert_eq!(backend.count("POST", "/api/podcast"), 1);

    let stored = backend.items("podcast");
    assert_eq!(stored[0]["shoot_date"], "2026-06-02");
    assert_eq!(stored[0]["status"], "scheduled");
    assert!(stored[0].get("link").is_none());
}

#[tokio::test]
async fn status_alias_sent_in_canonical_form() {
    let backend = MockBackend::start().await;
    let resource = Resource::<Podcast>::new(backend.api()).with_today(today());
    let form = PodcastForm {
        status: "on-hold".into(),
        ..podcast()
    };

    let created = resource.create(&form).await.unwrap().unwrap();
    assert_eq!(created.fields.status, "on hold");
    assert_eq!(backend.items("podcast")[0]["status"], "on hold");
}

#[tokio::test]
async fn acknowledged_create_returns_none() {
    let backend = MockBackend::start_with(MockState {
        ack_only: true,
        ..MockState::default()
    })
    .await;
    let resource = Resource::<Host>::new(backend.api());

    let created = resource.create(&HostForm { name: "Rina".into() }).await.unwrap();
    assert!(created.is_none());
    assert_eq!(backend.items("host").len(), 1);
}

// ---------------------------------------------------------------------------
// Test: update and delete use item paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_puts_to_item_path() {
    let backend = MockBackend::start().await;
    backend.seed("host", vec![json!({ "name": "Rina" })]);
    let resource = Resource::<Host>::new(backend.api());

    let updated = resource
        .update(1, &HostForm { name: "Rina P.".into() }, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(backend.items("host")[0]["name"], "Rina P.");
    assert_eq!(backend.count("PUT", "/api/host/1"), 1);
}

#[tokio::test]
async fn update_grandfathers_stored_past_shoot_date() {
    let backend = MockBackend::start().await;
    backend.seed(
        "podcast",
        vec![serde_json::to_value(PodcastForm {
            shoot_date: Some(date(2026, 5, 1)),
            upload_date: Some(date(2026, 5, 2)),
            ..podcast()
        })
        .unwrap()],
    );
    let resource = Resource::<Podcast>::new(backend.api()).with_today(today());
    let stored = resource.list().await.unwrap().remove(0);

    let edited = PodcastForm {
        title: "Eps 1 (re-cut)".into(),
        ..stored.fields.clone()
    };
    resource.update(stored.id, &edited, Some(&stored.fields)).await.unwrap();

    let moved = PodcastForm {
        shoot_date: Some(date(2026, 5, 2)),
        ..stored.fields.clone()
    };
    let err = resource.update(stored.id, &moved, Some(&stored.fields)).await.unwrap_err();
    assert_matches!(err, ClientError::Validation(errors) if errors.has("shoot_date"));
}

#[tokio::test]
async fn delete_hits_item_path() {
    let backend = MockBackend::start().await;
    backend.seed("quote", vec![json!({ "quote": "a" }), json!({ "quote": "b" })]);

    Resource::<Quote>::new(backend.api()).delete(2).await.unwrap();
    assert_eq!(backend.count("DELETE", "/api/quote/2"), 1);
    assert_eq!(backend.items("quote").len(), 1);
}

// ---------------------------------------------------------------------------
// Test: upload confirmation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn confirm_upload_marks_item_done() {
    let backend = MockBackend::start().await;
    backend.seed(
        "onlineplanner",
        vec![json!({
            "title": "Reels",
            "platform": "instagram",
            "content_type": "reels",
            "upload_date": "2026-06-01",
            "status": "scheduled"
        })],
    );
    let resource = Resource::<OnlinePlanner>::new(backend.api());

    let record = resource
        .confirm_upload(1, &UploadLinkForm::new("https://instagram.com/p/abc"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.fields.status, "done");
    assert_eq!(record.fields.link.as_deref(), Some("https://instagram.com/p/abc"));
    assert_eq!(backend.count("PUT", "/api/onlineplanner/1/upload"), 1);
}

#[tokio::test]
async fn confirm_upload_rejects_malformed_link_locally() {
    let backend = MockBackend::start().await;
    let resource = Resource::<Podcast>::new(backend.api());

    let err = resource
        .confirm_upload(1, &UploadLinkForm::new("not-a-url"))
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Validation(_));
    assert!(backend.seen().is_empty());
}

// ---------------------------------------------------------------------------
// Test: attachments go out as multipart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn video_idea_created_with_script_file() {
    let backend = MockBackend::start().await;
    let resource = Resource::<VideoIdea>::new(backend.api()).with_today(today());
    let form = VideoIdeaForm {
        title: "Day in the life".into(),
        concept: "Follow the team".into(),
        reference_link: None,
        pic: "Bayu".into(),
        shoot_date: Some(date(2026, 6, 3)),
        upload_date: Some(date(2026, 6, 5)),
        status: "on hold".into(),
        script_file: None,
    };
    let script = Attachment::new("script.docx", b"INT. OFFICE - DAY".to_vec());

    let created = resource
        .create_with_attachment(&form, Some(&script))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.fields.script_file.as_deref(), Some("uploads/script.docx"));
    assert_eq!(created.fields.shoot_date, Some(date(2026, 6, 3)));

    let upload = backend.state.lock().unwrap().last_upload.clone().unwrap();
    assert_eq!(upload.field, "script");
    assert_eq!(upload.file_name, "script.docx");
    assert_eq!(
        upload.content_type.as_deref(),
        Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
    );
    assert_eq!(upload.size, 17);
}

#[tokio::test]
async fn video_idea_without_script_rejected_locally() {
    let backend = MockBackend::start().await;
    let resource = Resource::<VideoIdea>::new(backend.api()).with_today(today());
    let form = VideoIdeaForm {
        title: "Vlog".into(),
        concept: "Concept".into(),
        pic: "Bayu".into(),
        shoot_date: Some(date(2026, 6, 3)),
        upload_date: Some(date(2026, 6, 5)),
        status: "scheduled".into(),
        ..VideoIdeaForm::default()
    };

    let err = resource.create_with_attachment(&form, None).await.unwrap_err();
    assert_matches!(err, ClientError::Validation(errors) if errors.has("script"));

    let txt = Attachment::new("script.txt", b"hello".to_vec());
    let err = resource.create_with_attachment(&form, Some(&txt)).await.unwrap_err();
    assert_matches!(err, ClientError::Validation(errors) if errors.has("script"));
    assert!(backend.seen().is_empty());
}

// ---------------------------------------------------------------------------
// Test: API failures surface an inline message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_message_surfaced_inline() {
    let backend = MockBackend::start().await;
    backend.set_fail(StatusCode::CONFLICT, r#"{"message":"Quote already exists"}"#);
    let resource = Resource::<Quote>::new(backend.api()).with_today(today());
    let form = QuoteForm {
        quote: "Stay curious".into(),
        author: "Team".into(),
        upload_date: Some(today()),
        status: "scheduled".into(),
        link: None,
    };

    let err = resource.create(&form).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.inline_message(), "Quote already exists");
}

#[tokio::test]
async fn bearer_token_sent_when_configured() {
    let backend = MockBackend::start().await;
    let api = backend.api().with_token("secret-token");

    Resource::<Host>::new(api).list().await.unwrap();
    let auth = backend.state.lock().unwrap().last_auth.clone();
    assert_eq!(auth.as_deref(), Some("Bearer secret-token"));
}

#[tokio::test]
async fn unreachable_backend_gives_generic_message() {
    let config = planboard_client::ClientConfig {
        base_url: "http://127.0.0.1:9".into(),
        timeout_secs: 2,
        ..planboard_client::ClientConfig::default()
    };
    let api = planboard_client::ApiClient::new(&config).unwrap();

    let err = Resource::<Host>::new(api).list().await.unwrap_err();
    assert_matches!(err, ClientError::Request(_));
    assert_eq!(err.inline_message(), planboard_client::error::GENERIC_FAILURE_MESSAGE);
}
