use anyhow::Result;
use axum::Router;
use axum::extract::{Query, RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use folio::client::SearchClient;

mod test_helpers {
    use super::*;

    #[derive(Clone, Default)]
    pub struct MockState {
        /// Raw query strings exactly as they arrived on the wire.
        pub raw_queries: Arc<Mutex<Vec<String>>>,
    }

    pub async fn mock_search(
        State(state): State<MockState>,
        RawQuery(raw): RawQuery,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        state
            .raw_queries
            .lock()
            .unwrap()
            .push(raw.unwrap_or_default());

        match params.get("q").map(String::as_str) {
            Some("one") => axum::Json(json!([{"id": 1, "name": "a"}])).into_response(),
            Some("empty") => axum::Json(json!([])).into_response(),
            Some("many") => axum::Json(json!([{"id": 1}, {"id": 2}, {"id": 3}])).into_response(),
            Some("text") => "not json at all".into_response(),
            Some("slow") => {
                tokio::time::sleep(Duration::from_millis(300)).await;
                axum::Json(json!(["slow"])).into_response()
            }
            _ => axum::Json(json!(["fast"])).into_response(),
        }
    }

    /// Binds the mock endpoint on an ephemeral port and returns its base URL.
    pub async fn spawn_mock_server() -> Result<(String, MockState)> {
        let state = MockState::default();
        let router = Router::new()
            .route("/search", get(mock_search))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Ok((format!("http://{}", addr), state))
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_submit_renders_one_item_per_result() -> Result<()> {
    let (endpoint, _state) = spawn_mock_server().await?;
    let client = SearchClient::new(endpoint);

    client.submit("one").await?;
    assert_eq!(client.pane().inner_html(), r#"<li>{"id":1,"name":"a"}</li>"#);
    Ok(())
}

#[tokio::test]
async fn test_submit_with_empty_result_clears_the_pane() -> Result<()> {
    let (endpoint, _state) = spawn_mock_server().await?;
    let client = SearchClient::new(endpoint);

    client.submit("one").await?;
    client.submit("empty").await?;
    assert_eq!(client.pane().inner_html(), "");
    Ok(())
}

#[tokio::test]
async fn test_submit_preserves_result_order() -> Result<()> {
    let (endpoint, _state) = spawn_mock_server().await?;
    let client = SearchClient::new(endpoint);

    client.submit("many").await?;
    assert_eq!(
        client.pane().inner_html(),
        r#"<li>{"id":1}</li><li>{"id":2}</li><li>{"id":3}</li>"#
    );
    Ok(())
}

#[tokio::test]
async fn test_query_reaches_the_wire_without_form_encoding() -> Result<()> {
    let (endpoint, state) = spawn_mock_server().await?;
    let client = SearchClient::new(endpoint);

    // Spaces are normalized by the URL layer itself; nothing else is encoded.
    client.submit("x y").await?;
    // An ampersand splits the parameter on the wire.
    client.submit("a&b").await?;

    let raw = state.raw_queries.lock().unwrap().clone();
    assert_eq!(raw, vec!["q=x%20y".to_string(), "q=a&b".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_slower_response_overwrites_faster_one() -> Result<()> {
    let (endpoint, _state) = spawn_mock_server().await?;
    let client = SearchClient::new(endpoint);

    // The "slow" submission is issued first but resolves last; without
    // cancellation or ordering, the last response to arrive wins the pane.
    let (first, second) = tokio::join!(client.submit("slow"), client.submit("fast"));
    first?;
    second?;
    assert_eq!(client.pane().inner_html(), r#"<li>"slow"</li>"#);
    Ok(())
}

#[tokio::test]
async fn test_non_json_response_propagates_as_error() -> Result<()> {
    let (endpoint, _state) = spawn_mock_server().await?;
    let client = SearchClient::new(endpoint);

    client.submit("one").await?;
    let err = client.submit("text").await;
    assert!(err.is_err());
    // The failed submission must not touch the pane.
    assert_eq!(client.pane().inner_html(), r#"<li>{"id":1,"name":"a"}</li>"#);
    Ok(())
}
