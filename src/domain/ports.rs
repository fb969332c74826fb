use crate::domain::model::{Element, HttpRequest, HttpResponse, Selector, WidgetKind};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Moves one request over the wire. Non-2xx statuses are returned, not raised.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

pub trait Document {
    fn query_selector_all(&self, selector: &Selector) -> Vec<Element>;
}

pub trait WidgetToolkit {
    fn create(&mut self, kind: WidgetKind, element: &Element) -> Result<()>;
}
