//! Binding of tooltip and toast widgets to marked page elements.

use crate::domain::model::{Element, Selector, WidgetKind};
use crate::domain::ports::{Document, WidgetToolkit};
use crate::utils::error::{DashError, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

pub const TOOLTIP_ATTRIBUTE: &str = "data-bs-toggle";
pub const TOOLTIP_VALUE: &str = "tooltip";
pub const TOAST_CLASS: &str = "toast";

pub fn tooltip_selector() -> Selector {
    Selector::Attribute {
        name: TOOLTIP_ATTRIBUTE.to_string(),
        value: TOOLTIP_VALUE.to_string(),
    }
}

pub fn toast_selector() -> Selector {
    Selector::Class(TOAST_CLASS.to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    pub tooltips: usize,
    pub toasts: usize,
}

impl InitReport {
    pub fn total(&self) -> usize {
        self.tooltips + self.toasts
    }
}

/// Runs the document-ready widget setup at most once.
#[derive(Debug, Default)]
pub struct BootstrapInitializer {
    done: AtomicBool,
}

impl BootstrapInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    pub fn on_ready<D, W>(&self, document: &D, toolkit: &mut W) -> Result<InitReport>
    where
        D: Document + ?Sized,
        W: WidgetToolkit + ?Sized,
    {
        if self.done.swap(true, Ordering::AcqRel) {
            tracing::warn!("Document ready fired again; widgets left untouched");
            return Err(DashError::AlreadyInitialized);
        }

        let mut report = InitReport::default();

        for element in document.query_selector_all(&tooltip_selector()) {
            toolkit.create(WidgetKind::Tooltip, &element)?;
            report.tooltips += 1;
        }

        for element in document.query_selector_all(&toast_selector()) {
            toolkit.create(WidgetKind::Toast, &element)?;
            report.toasts += 1;
        }

        tracing::info!(
            "Widgets initialized: {} tooltips, {} toasts",
            report.tooltips,
            report.toasts
        );
        Ok(report)
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    elements: Vec<Element>,
}

/// A document backed by a flat element list, in document order.
#[derive(Debug, Clone, Default)]
pub struct StaticDocument {
    elements: Vec<Element>,
}

impl StaticDocument {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Parses `{"elements": [...]}` or a bare element array.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let elements = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            serde_json::from_value::<Manifest>(value)?.elements
        };
        Ok(Self { elements })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Document for StaticDocument {
    fn query_selector_all(&self, selector: &Selector) -> Vec<Element> {
        self.elements
            .iter()
            .filter(|e| selector.matches(e))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetBinding {
    pub kind: WidgetKind,
    pub element_id: String,
}

/// Toolkit that keeps every created widget in memory.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    bindings: Vec<WidgetBinding>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> &[WidgetBinding] {
        &self.bindings
    }

    pub fn count(&self, kind: WidgetKind) -> usize {
        self.bindings.iter().filter(|b| b.kind == kind).count()
    }
}

impl WidgetToolkit for WidgetRegistry {
    fn create(&mut self, kind: WidgetKind, element: &Element) -> Result<()> {
        tracing::debug!("Binding {:?} to #{}", kind, element.id);
        self.bindings.push(WidgetBinding {
            kind,
            element_id: element.id.clone(),
        });
        Ok(())
    }
}

/// Stands in for a page where the widget library never loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct MissingToolkit;

impl WidgetToolkit for MissingToolkit {
    fn create(&mut self, kind: WidgetKind, element: &Element) -> Result<()> {
        Err(DashError::WidgetError {
            message: format!("no {:?} constructor available for #{}", kind, element.id),
        })
    }
}
