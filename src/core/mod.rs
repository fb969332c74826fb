pub mod api;
pub mod endpoints;
pub mod format;
pub mod notify;
pub mod transport;
pub mod widgets;

pub use crate::domain::model::{
    Element, HttpMethod, HttpRequest, HttpResponse, Notification, Selector, ToastKind, WidgetKind,
};
pub use crate::domain::ports::{Document, Transport, WidgetToolkit};
pub use crate::utils::error::Result;
