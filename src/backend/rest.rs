//! HTTP persistence over the browser's `fetch`.
//!
//! Requests are fire-and-forget: each call is spawned on the microtask
//! queue and returns immediately. Fetched rows come back through a
//! [`RowSink`]; failures are logged and reported to the optional error sink.

use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::{CellUpdate, Delivery, Persistence, RowRecord};
use crate::error::{js_error, GridError, Result};

/// Receives rows fetched for `(offset, rows)`.
pub type RowSink = Rc<dyn Fn(usize, Vec<RowRecord>)>;
/// Receives a failure message for a request that already returned.
pub type ErrorSink = Rc<dyn Fn(GridError)>;

#[derive(Serialize)]
struct RangeBody {
    offset: usize,
    limit: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplaceBody<'a> {
    find_text: &'a str,
    replace_text: &'a str,
}

#[derive(Serialize)]
struct DeleteBody {
    id: u64,
}

/// JSON-over-HTTP backend rooted at `base_url`.
pub struct RestBackend {
    base_url: String,
    rows: Option<RowSink>,
    errors: Option<ErrorSink>,
}

impl RestBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            rows: None,
            errors: None,
        }
    }

    /// Where fetched rows are delivered.
    pub fn set_row_sink(&mut self, sink: RowSink) {
        self.rows = Some(sink);
    }

    /// Where asynchronous failures are delivered.
    pub fn set_error_sink(&mut self, sink: ErrorSink) {
        self.errors = Some(sink);
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Spawn a POST of `body` to `endpoint`, handing the parsed response
    /// text to `on_ok`.
    fn post<B, F>(&self, endpoint: &str, body: &B, on_ok: F) -> Result<()>
    where
        B: Serialize,
        F: FnOnce(String) -> Result<()> + 'static,
    {
        let payload = serde_json::to_string(body)?;
        let request = build_request(&self.url(endpoint), &payload)?;
        let errors = self.errors.clone();
        let endpoint = endpoint.to_string();
        spawn_local(async move {
            let outcome = match send(request).await {
                Ok(text) => on_ok(text),
                Err(e) => Err(e),
            };
            if let Err(e) = outcome {
                tracing::warn!(target: "sheetgrid::backend", endpoint = %endpoint, error = %e, "request failed");
                if let Some(sink) = errors {
                    sink(e);
                }
            }
        });
        Ok(())
    }
}

fn build_request(url: &str, payload: &str) -> Result<Request> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_body(&JsValue::from_str(payload));
    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|e| GridError::Persistence(js_error("build request", &e)))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| GridError::Persistence(js_error("set header", &e)))?;
    Ok(request)
}

async fn send(request: Request) -> Result<String> {
    let window = web_sys::window().ok_or("No window")?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| GridError::Persistence(js_error("fetch", &e)))?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| GridError::Persistence("fetch did not return a Response".to_string()))?;
    if !response.ok() {
        return Err(GridError::Persistence(format!(
            "server responded with status {}",
            response.status()
        )));
    }
    let text = response
        .text()
        .map_err(|e| GridError::Persistence(js_error("read body", &e)))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| GridError::Persistence(js_error("read body", &e)))?;
    Ok(text.as_string().unwrap_or_default())
}

impl Persistence for RestBackend {
    fn fetch_rows(&mut self, offset: usize, limit: usize) -> Result<Delivery<Vec<RowRecord>>> {
        let sink = self.rows.clone();
        self.post("getCsv", &RangeBody { offset, limit }, move |text| {
            let rows: Vec<RowRecord> = serde_json::from_str(&text)?;
            if let Some(sink) = sink {
                sink(offset, rows);
            }
            Ok(())
        })?;
        Ok(Delivery::Pending)
    }

    fn update_cell(&mut self, update: &CellUpdate) -> Result<()> {
        self.post("UpdateRecord", update, |_| Ok(()))
    }

    fn delete_row(&mut self, row_id: u64) -> Result<()> {
        self.post("deleteRecord", &DeleteBody { id: row_id }, |_| Ok(()))
    }

    fn find_and_replace(&mut self, find: &str, replace: &str) -> Result<()> {
        let body = ReplaceBody {
            find_text: find,
            replace_text: replace,
        };
        self.post("findAndReplace", &body, |_| Ok(()))
    }
}
