//! DOM-backed host for [`FixedTable`].
//!
//! Measures the rendered `<table>` inside the content viewport, registers
//! scroll/resize listeners on the window, the document and the viewport, and
//! schedules deferred work with a zero-delay `setTimeout`.

use js_sys::Reflect;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, HtmlElement};

use crate::config::DEFAULT_SCROLLBAR_WIDTH;
use crate::error::{Result, StickyGridError};
use crate::host::{
    EventSource, HostEvent, Listen, ListenerId, TableSurface, TickHandle, TickSource,
};
use crate::table::FixedTable;
use crate::types::{Key, MeasuredCell, Rect, ScrollMetrics};

/// Shared handle to a table driven by a [`DomHost`]
pub type SharedTable = Rc<RefCell<FixedTable<DomHost>>>;

struct Registration {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

pub struct DomHost {
    content: HtmlElement,
    affix_header: Option<HtmlElement>,
    table: Weak<RefCell<FixedTable<DomHost>>>,
    registrations: HashMap<u64, Registration>,
    next_listener: u64,
    tick_closure: Option<Closure<dyn FnMut()>>,
    scrollbar_width: f64,
}

fn js_err(e: &JsValue) -> StickyGridError {
    StickyGridError::Host(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

fn read_f64(element: &Element, prop: &str) -> Option<f64> {
    Reflect::get(element.as_ref(), &JsValue::from_str(prop))
        .ok()
        .and_then(|value| value.as_f64())
}

fn element_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.top(), r.left(), r.width(), r.height())
}

fn child_elements(element: &Element) -> Vec<Element> {
    let children = element.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .collect()
}

/// Width of the platform scrollbar, measured with an off-screen element
fn measure_scrollbar_width() -> Option<f64> {
    let document = web_sys::window()?.document()?;
    let body = document.body()?;
    let scratch = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    let style = scratch.style();
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("top", "-9999px");
    let _ = style.set_property("width", "100px");
    let _ = style.set_property("height", "100px");
    let _ = style.set_property("overflow", "scroll");
    body.append_child(&scratch).ok()?;
    let width = f64::from(scratch.offset_width() - scratch.client_width());
    scratch.remove();
    Some(width)
}

/// Run a host event against the table, if it is still alive and not busy
fn dispatch(table: &Weak<RefCell<FixedTable<DomHost>>>, event: HostEvent) {
    let Some(table) = table.upgrade() else {
        return;
    };
    let Ok(mut table) = table.try_borrow_mut() else {
        log::debug!("table busy, {event:?} dropped");
        return;
    };
    if let Err(e) = table.handle(event) {
        log::warn!("{event:?} handling failed: {e}");
    }
}

impl DomHost {
    pub fn new(content: HtmlElement, affix_header: Option<HtmlElement>) -> Self {
        Self {
            content,
            affix_header,
            table: Weak::new(),
            registrations: HashMap::new(),
            next_listener: 0,
            tick_closure: None,
            scrollbar_width: measure_scrollbar_width().unwrap_or(DEFAULT_SCROLLBAR_WIDTH),
        }
    }

    /// Point listener and timer callbacks at the table owning this host
    pub fn bind(&mut self, table: &SharedTable) {
        self.table = Rc::downgrade(table);
    }

    fn section(&self, tag: &str) -> Option<Element> {
        self.content.query_selector(tag).ok().flatten()
    }

    fn target_for(&self, kind: Listen) -> Option<EventTarget> {
        match kind {
            Listen::WindowResize => web_sys::window().map(EventTarget::from),
            Listen::DocumentScroll => web_sys::window()
                .and_then(|w| w.document())
                .map(EventTarget::from),
            Listen::ContentScroll => Some(EventTarget::from(self.content.clone())),
        }
    }
}

impl TableSurface for DomHost {
    fn header_rows(&self) -> Vec<Vec<MeasuredCell>> {
        let Some(thead) = self.section("thead") else {
            return Vec::new();
        };
        child_elements(&thead)
            .iter()
            .map(|tr| {
                child_elements(tr)
                    .into_iter()
                    .filter_map(|th| th.dyn_into::<HtmlElement>().ok())
                    .map(|th| MeasuredCell {
                        col_key: th.dataset().get("colkey").map(Key::Name),
                        label: th.inner_text(),
                        width: th.get_bounding_client_rect().width(),
                    })
                    .collect()
            })
            .collect()
    }

    fn body_row_heights(&self) -> Vec<f64> {
        let Some(tbody) = self.section("tbody") else {
            return Vec::new();
        };
        child_elements(&tbody)
            .iter()
            .map(|tr| tr.get_bounding_client_rect().height())
            .collect()
    }

    fn header_height(&self) -> Option<f64> {
        self.section("thead").map(|e| element_rect(&e).height)
    }

    fn footer_height(&self) -> Option<f64> {
        self.section("tfoot").map(|e| element_rect(&e).height)
    }

    fn content_metrics(&self) -> Option<ScrollMetrics> {
        let el: &Element = self.content.as_ref();
        Some(ScrollMetrics {
            scroll_left: read_f64(el, "scrollLeft").unwrap_or_else(|| f64::from(el.scroll_left())),
            scroll_top: read_f64(el, "scrollTop").unwrap_or_else(|| f64::from(el.scroll_top())),
            scroll_width: f64::from(el.scroll_width()),
            scroll_height: f64::from(el.scroll_height()),
            client_width: f64::from(el.client_width()),
            client_height: f64::from(el.client_height()),
        })
    }

    fn content_rect(&self) -> Option<Rect> {
        Some(element_rect(self.content.as_ref()))
    }

    fn affix_header_height(&self) -> Option<f64> {
        self.affix_header
            .as_ref()
            .map(|h| f64::from(h.offset_height()))
    }

    fn set_affix_scroll_left(&mut self, left: f64) {
        if let Some(header) = &self.affix_header {
            let _ = Reflect::set(
                header.as_ref(),
                &JsValue::from_str("scrollLeft"),
                &JsValue::from_f64(left),
            );
        }
    }

    fn scrollbar_width(&self) -> f64 {
        self.scrollbar_width
    }
}

impl EventSource for DomHost {
    fn listen(&mut self, kind: Listen) -> Result<ListenerId> {
        let target = self
            .target_for(kind)
            .ok_or_else(|| StickyGridError::Host(format!("no event target for {kind:?}")))?;
        let event = match kind {
            Listen::WindowResize => "resize",
            Listen::DocumentScroll | Listen::ContentScroll => "scroll",
        };
        let table = self.table.clone();
        let host_event = HostEvent::from(kind);
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            dispatch(&table, host_event);
        }) as Box<dyn FnMut(web_sys::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| js_err(&e))?;

        self.next_listener += 1;
        let id = self.next_listener;
        self.registrations.insert(
            id,
            Registration {
                target,
                event,
                closure,
            },
        );
        Ok(ListenerId(id))
    }

    fn unlisten(&mut self, id: ListenerId) {
        if let Some(reg) = self.registrations.remove(&id.0) {
            let _ = reg
                .target
                .remove_event_listener_with_callback(reg.event, reg.closure.as_ref().unchecked_ref());
        }
    }
}

impl TickSource for DomHost {
    fn request_tick(&mut self) -> Result<TickHandle> {
        let window = web_sys::window().ok_or_else(|| StickyGridError::Host("no window".into()))?;
        if self.tick_closure.is_none() {
            let table = self.table.clone();
            let closure = Closure::wrap(Box::new(move || {
                dispatch(&table, HostEvent::Tick);
            }) as Box<dyn FnMut()>);
            self.tick_closure = Some(closure);
        }
        let Some(callback) = self.tick_closure.as_ref() else {
            return Err(StickyGridError::Host("tick callback missing".into()));
        };
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                0,
            )
            .map_err(|e| js_err(&e))?;
        Ok(TickHandle(i64::from(id)))
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if let (Some(window), Ok(id)) = (web_sys::window(), i32::try_from(handle.0)) {
            window.clear_timeout_with_handle(id);
        }
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        for (_, reg) in self.registrations.drain() {
            let _ = reg
                .target
                .remove_event_listener_with_callback(reg.event, reg.closure.as_ref().unchecked_ref());
        }
    }
}
