use super::*;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::protocol::{GuessWordsQuery, GuessWordsResponse};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    words: HashMap<String, Vec<String>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
    delay: Option<Duration>,
}

async fn handle_guess(
    State(state): State<ServerState>,
    Path(category): Path<String>,
    Query(query): Query<GuessWordsQuery>,
) -> Result<Json<GuessWordsResponse>, StatusCode> {
    state
        .requests
        .lock()
        .await
        .push((category.clone(), query.locale));
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    state
        .words
        .get(&category)
        .map(|words| {
            Json(GuessWordsResponse {
                words: words.clone(),
            })
        })
        .ok_or(StatusCode::NOT_FOUND)
}

async fn spawn_word_server(state: ServerState) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/guess/:category", get(handle_guess))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn animals() -> HashMap<String, Vec<String>> {
    HashMap::from([(
        "animals".to_string(),
        vec!["cat".to_string(), "dog".to_string(), "fish".to_string()],
    )])
}

#[tokio::test]
async fn fetches_words_for_category_and_locale() {
    let state = ServerState {
        words: animals(),
        ..ServerState::default()
    };
    let requests = state.requests.clone();
    let server_url = spawn_word_server(state).await;
    let source = HttpWordSource::new(&server_url, DEFAULT_REQUEST_TIMEOUT).expect("source");

    let words = source.fetch_words("animals", "pt-BR").await.expect("words");

    assert_eq!(words, vec!["cat", "dog", "fish"]);
    assert_eq!(
        requests.lock().await.as_slice(),
        &[("animals".to_string(), "pt-BR".to_string())]
    );
}

#[tokio::test]
async fn category_with_spaces_is_sent_as_single_path_segment() {
    let state = ServerState {
        words: HashMap::from([("farm animals".to_string(), vec!["cow".to_string()])]),
        ..ServerState::default()
    };
    let server_url = spawn_word_server(state).await;
    let source = HttpWordSource::new(&server_url, DEFAULT_REQUEST_TIMEOUT).expect("source");

    let words = source
        .fetch_words("farm animals", "en-US")
        .await
        .expect("words");
    assert_eq!(words, vec!["cow"]);
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let server_url = spawn_word_server(ServerState::default()).await;
    let source = HttpWordSource::new(&server_url, DEFAULT_REQUEST_TIMEOUT).expect("source");

    let err = source
        .fetch_words("emotions", "en-US")
        .await
        .expect_err("404 must fail");
    match err {
        WordSourceError::Transport(inner) => {
            assert_eq!(inner.status(), Some(reqwest::StatusCode::NOT_FOUND))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_service_times_out() {
    let state = ServerState {
        words: animals(),
        delay: Some(Duration::from_secs(5)),
        ..ServerState::default()
    };
    let server_url = spawn_word_server(state).await;
    let source = HttpWordSource::new(&server_url, Duration::from_millis(100)).expect("source");

    let err = source
        .fetch_words("animals", "en-US")
        .await
        .expect_err("must time out");
    match err {
        WordSourceError::Transport(inner) => assert!(inner.is_timeout(), "{inner}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let source =
        HttpWordSource::new(&format!("http://{addr}"), DEFAULT_REQUEST_TIMEOUT).expect("source");
    let err = source
        .fetch_words("animals", "en-US")
        .await
        .expect_err("connection must fail");
    assert!(matches!(err, WordSourceError::Transport(_)), "{err:?}");
}

#[test]
fn guess_url_keeps_base_path_prefix() {
    let source =
        HttpWordSource::new("https://words.example/api/", DEFAULT_REQUEST_TIMEOUT).expect("source");
    assert_eq!(
        source.guess_url("animals").expect("url").as_str(),
        "https://words.example/api/guess/animals"
    );

    let source =
        HttpWordSource::new("https://words.example", DEFAULT_REQUEST_TIMEOUT).expect("source");
    assert_eq!(
        source.guess_url("objects").expect("url").as_str(),
        "https://words.example/guess/objects"
    );
}

#[test]
fn rejects_non_http_base_urls() {
    for raw in ["not a url", "mailto:someone@example.com", "ftp://words.example"] {
        let err = HttpWordSource::new(raw, DEFAULT_REQUEST_TIMEOUT).expect_err(raw);
        assert!(
            matches!(err, WordSourceError::InvalidBaseUrl { .. }),
            "{raw}: {err:?}"
        );
    }
}

#[tokio::test]
async fn static_source_serves_configured_categories() {
    let source = StaticWordSource::from_toml_str(
        r#"
animals = ["cat", "dog"]
objects = []
"#,
    )
    .expect("parse");

    assert_eq!(
        source.fetch_words("animals", "en-US").await.expect("words"),
        vec!["cat", "dog"]
    );
    assert!(source
        .fetch_words("objects", "en-US")
        .await
        .expect("words")
        .is_empty());

    let err = source
        .fetch_words("emotions", "en-US")
        .await
        .expect_err("unknown category");
    assert!(matches!(err, WordSourceError::UnknownCategory(ref key) if key == "emotions"));
}

#[test]
fn static_source_reports_missing_file_path() {
    let err = StaticWordSource::from_file("./does/not/exist/words.toml").expect_err("missing");
    assert!(err.to_string().contains("words.toml"), "{err}");
}
