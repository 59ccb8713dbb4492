//! Document store client over `fetch`.
//!
//! Both operations hit the same document URL: `GET` to read, `PUT` with the
//! full collection to overwrite. Each request is raced against a timer so a
//! stalled connection surfaces as [`StoreError::Timeout`] instead of leaving
//! the UI in its loading or saving state. A request that loses the race is
//! aborted, so a late `PUT` cannot land after a newer save.

use async_trait::async_trait;
use common::config::StoreConfig;
use common::error::StoreError;
use common::model::Collection;
use common::store::codec::{
    decode_record, encode_document, ACCESS_KEY_HEADER, CONTENT_TYPE_JSON, MASTER_KEY_HEADER,
};
use common::store::deadline::with_deadline;
use common::store::DocumentStore;
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use log::{debug, warn};
use web_sys::AbortController;

pub struct HttpDocumentStore {
    config: StoreConfig,
}

impl HttpDocumentStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Adds the access headers and a fresh abort signal to `builder`.
    fn prepare(
        &self,
        builder: RequestBuilder,
    ) -> Result<(RequestBuilder, AbortController), StoreError> {
        let controller = AbortController::new()
            .map_err(|err| StoreError::Network(format!("cannot create abort controller: {err:?}")))?;
        let builder = builder
            .header(MASTER_KEY_HEADER, &self.config.master_key)
            .header(ACCESS_KEY_HEADER, &self.config.access_key)
            .abort_signal(Some(&controller.signal()));
        Ok((builder, controller))
    }

    async fn execute(
        &self,
        request: Request,
        controller: AbortController,
    ) -> Result<Collection, StoreError> {
        let method = request.method();
        debug!("{method} collection document");
        let millis = self.config.timeout_millis;
        with_deadline(
            millis,
            async move {
                let response = request.send().await.map_err(network)?;
                let status = response.status();
                let body = response.text().await.map_err(network)?;
                decode_record(status, &body)
            },
            TimeoutFuture::new(millis),
            move || {
                warn!("{method} collection document timed out after {millis} ms, aborting");
                controller.abort();
            },
        )
        .await
    }
}

#[async_trait(?Send)]
impl DocumentStore for HttpDocumentStore {
    async fn fetch_collection(&self) -> Result<Collection, StoreError> {
        let (builder, controller) = self.prepare(Request::get(&self.config.document_url()))?;
        let request = builder.build().map_err(network)?;
        self.execute(request, controller).await
    }

    async fn save_collection(&self, collection: &Collection) -> Result<Collection, StoreError> {
        let body = encode_document(collection)?;
        let (builder, controller) = self.prepare(Request::put(&self.config.document_url()))?;
        let request = builder
            .header("Content-Type", CONTENT_TYPE_JSON)
            .body(body)
            .map_err(network)?;
        self.execute(request, controller).await
    }
}

fn network(err: gloo_net::Error) -> StoreError {
    StoreError::Network(err.to_string())
}
