//! Page count and page scheme lookups over `fetch`

use async_trait::async_trait;
use pdfsign_forms::{
    EndpointConfig, FetchError, PageCountResponse, PageDataSource, PageSchemesResponse,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

#[derive(Debug, Clone, Default)]
pub struct HttpPageSource {
    endpoints: EndpointConfig,
}

impl HttpPageSource {
    pub fn new(endpoints: EndpointConfig) -> Self {
        Self { endpoints }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let window = web_sys::window().ok_or_else(|| FetchError::Network("No window".into()))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::SameOrigin);

        let request = Request::new_with_str_and_init(url, &opts).map_err(network)?;
        request
            .headers()
            .set("Accept", "application/json")
            .map_err(network)?;

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?;
        let response: Response = response.dyn_into().map_err(network)?;

        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }

        let body = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?;
        let body = body
            .as_string()
            .ok_or_else(|| FetchError::Decode("response body is not text".to_string()))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

fn network(e: JsValue) -> FetchError {
    FetchError::Network(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

fn encode(document_ref: &str) -> String {
    js_sys::encode_uri_component(document_ref).into()
}

#[async_trait(?Send)]
impl PageDataSource for HttpPageSource {
    async fn page_count(&self, document_ref: &str) -> Result<PageCountResponse, FetchError> {
        let url = self.endpoints.page_count_url(&encode(document_ref));
        tracing::debug!("GET {}", url);
        self.get_json(&url).await
    }

    async fn page_schemes(&self, document_ref: &str) -> Result<PageSchemesResponse, FetchError> {
        let url = self.endpoints.page_schemes_url(&encode(document_ref));
        tracing::debug!("GET {}", url);
        self.get_json(&url).await
    }
}
