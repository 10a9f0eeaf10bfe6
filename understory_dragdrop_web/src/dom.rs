// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry, computed style and cursor access on real DOM nodes.

use alloc::string::String;
use core::fmt;

use kurbo::Rect;
use understory_cursor::{CursorSink, OVERRIDE_CURSOR_CLASS};
use understory_dom_metrics::{BoxSizing, ComputedStyle, SizeLimits, box_sizing, size_limits};
use understory_dragdrop::BoundingRect;
use wasm_bindgen::JsValue;
use web_sys::{CssStyleDeclaration, Document, Element};

/// An element used as drag source or drop target geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomNode(pub Element);

impl BoundingRect for DomNode {
    fn bounding_rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }
}

/// Computed style of one element.
#[derive(Clone, Debug)]
pub struct ElementStyle(CssStyleDeclaration);

impl ElementStyle {
    /// Fetch the computed style of `element` from its document's window.
    pub fn of(element: &Element) -> Result<Self, JsValue> {
        let window = element
            .owner_document()
            .and_then(|d| d.default_view())
            .ok_or_else(|| JsValue::from_str("element has no window"))?;
        let style = window
            .get_computed_style(element)?
            .ok_or_else(|| JsValue::from_str("no computed style"))?;
        Ok(Self(style))
    }
}

impl ComputedStyle for ElementStyle {
    fn property_value(&self, name: &str) -> String {
        self.0.get_property_value(name).unwrap_or_default()
    }
}

/// [`box_sizing`] of an element's current computed style.
pub fn element_box_sizing(element: &Element) -> Result<BoxSizing, JsValue> {
    Ok(box_sizing(&ElementStyle::of(element)?))
}

/// [`size_limits`] of an element's current computed style.
pub fn element_size_limits(element: &Element) -> Result<SizeLimits, JsValue> {
    Ok(size_limits(&ElementStyle::of(element)?))
}

/// Applies cursor overrides to a document.
///
/// The cursor goes on `document.body`; the marker class goes on the root
/// element so stylesheets can force the cursor on descendants too.
pub struct DocumentCursorSink {
    document: Document,
}

impl fmt::Debug for DocumentCursorSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DocumentCursorSink { .. }")
    }
}

impl DocumentCursorSink {
    /// Create a sink for `document`.
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl CursorSink for DocumentCursorSink {
    fn set_cursor(&mut self, cursor: Option<&str>) {
        let body = self.document.body();
        let root = self.document.document_element();
        let result = match cursor {
            Some(cursor) => body
                .map_or(Ok(()), |b| b.style().set_property("cursor", cursor))
                .and_then(|()| root.map_or(Ok(()), |r| r.class_list().add_1(OVERRIDE_CURSOR_CLASS))),
            None => body
                .map_or(Ok(()), |b| b.style().remove_property("cursor").map(drop))
                .and_then(|()| {
                    root.map_or(Ok(()), |r| r.class_list().remove_1(OVERRIDE_CURSOR_CLASS))
                }),
        };
        if let Err(err) = result {
            tracing::warn!(?err, "failed to apply cursor override");
        }
    }
}
