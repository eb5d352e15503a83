use anyhow::Result;
use serde_json::Value;
use std::sync::Mutex;

/// The container whose content the renderer replaces. Each render is one
/// atomic overwrite of the whole pane; there is no diffing or appending.
#[derive(Debug, Default)]
pub struct ResultsPane {
    inner_html: Mutex<String>,
}

impl ResultsPane {
    pub fn replace(&self, html: String) {
        *self.inner_html.lock().unwrap() = html;
    }

    pub fn inner_html(&self) -> String {
        self.inner_html.lock().unwrap().clone()
    }
}

/// Projects a result sequence into list-item markup: one `<li>` per result,
/// item text being the compact JSON serialization of the result, concatenated
/// in input order. Serialized values are inserted as-is, without markup
/// escaping, so a `<` inside a result string lands in the output verbatim.
pub fn render_list(results: &[Value]) -> Result<String> {
    let rows = results
        .iter()
        .map(|result| Ok(format!("<li>{}</li>", serde_json::to_string(result)?)))
        .collect::<Result<Vec<String>>>()?;
    Ok(rows.join(""))
}

/// Client half of the search page: submits a query to a running server and
/// renders the response into the results pane.
///
/// A submission is a single asynchronous task awaited to completion, with the
/// pane update as its continuation. Overlapping submissions race: whichever
/// response arrives last overwrites the pane, regardless of submission order.
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
    pane: ResultsPane,
}

impl SearchClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            pane: ResultsPane::default(),
        }
    }

    pub fn pane(&self) -> &ResultsPane {
        &self.pane
    }

    /// Issues `GET <endpoint>/search?q=<query>` and replaces the pane with the
    /// rendered response.
    ///
    /// The query is embedded raw: no form encoding is applied, so reserved
    /// characters such as `&` or `#` pass through and alter the request. The
    /// response body is parsed as a JSON sequence of opaque values with no
    /// schema enforced and no status check; transport failures and non-JSON
    /// bodies propagate to the caller unhandled.
    pub async fn submit(&self, query: &str) -> Result<()> {
        let url = format!("{}/search?q={}", self.endpoint, query);
        let results: Vec<Value> = self.http.get(&url).send().await?.json().await?;
        self.pane.replace(render_list(&results)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_single_object() {
        let results = vec![json!({"id": 1, "name": "a"})];
        let html = render_list(&results).unwrap();
        assert_eq!(html, r#"<li>{"id":1,"name":"a"}</li>"#);
    }

    #[test]
    fn test_render_empty_sequence() {
        let html = render_list(&[]).unwrap();
        assert_eq!(html, "");
    }

    #[test]
    fn test_render_preserves_input_order() {
        let results = vec![json!(3), json!(1), json!(2)];
        let html = render_list(&results).unwrap();
        assert_eq!(html, "<li>3</li><li>1</li><li>2</li>");
    }

    #[test]
    fn test_render_mixed_value_shapes() {
        // Results are opaque: any JSON value renders via its serialized form.
        let results = vec![json!("plain"), json!([1, 2]), json!(null)];
        let html = render_list(&results).unwrap();
        assert_eq!(html, r#"<li>"plain"</li><li>[1,2]</li><li>null</li>"#);
    }

    #[test]
    fn test_render_does_not_escape_markup() {
        let results = vec![json!({"snippet": "<b>bold</b>"})];
        let html = render_list(&results).unwrap();
        assert_eq!(html, r#"<li>{"snippet":"<b>bold</b>"}</li>"#);
    }

    #[test]
    fn test_pane_replace_overwrites_prior_content() {
        let pane = ResultsPane::default();
        pane.replace("<li>old</li>".to_string());
        pane.replace("<li>new</li>".to_string());
        assert_eq!(pane.inner_html(), "<li>new</li>");
    }
}
