//! Row DragDrop Utilities
//!
//! HTML5 drag-and-drop reordering for server-rendered rows.
//! The hovered row's vertical midpoint decides whether the dragged
//! row lands before or after it. The DOM order is the result; callers
//! read it back with [`read_order`] once the drag ends.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Where the dragged row goes relative to the hovered row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Midpoint rule. A degenerate (zero-height) row always yields `Before`.
pub fn placement(pointer_y: f64, top: f64, bottom: f64) -> Placement {
    let height = bottom - top;
    if height > 0.0 && (pointer_y - top) / height > 0.5 {
        Placement::After
    } else {
        Placement::Before
    }
}

/// Drag lifecycle: idle until a row starts dragging
#[derive(Clone, Debug, PartialEq)]
pub enum DragPhase<R> {
    Idle,
    Dragging(R),
}

/// Per-list drag state, generic over the row handle
#[derive(Clone, Debug)]
pub struct DragSession<R> {
    phase: DragPhase<R>,
}

impl<R> Default for DragSession<R> {
    fn default() -> Self {
        Self { phase: DragPhase::Idle }
    }
}

impl<R: Clone + PartialEq> DragSession<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DragPhase<R> {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// idle -> dragging
    pub fn start(&mut self, row: R) {
        self.phase = DragPhase::Dragging(row);
    }

    /// Row to move when `target` is hovered. None while idle or over itself.
    pub fn over(&self, target: &R) -> Option<R> {
        match &self.phase {
            DragPhase::Dragging(row) if row != target => Some(row.clone()),
            _ => None,
        }
    }

    /// dragging -> idle, yielding the row that was dragged
    pub fn end(&mut self) -> Option<R> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging(row) => Some(row),
            DragPhase::Idle => None,
        }
    }
}

/// How rows inside a container are found and identified
#[derive(Clone, Copy, Debug)]
pub struct SortableOptions {
    /// Selector for draggable rows, relative to the container
    pub row_selector: &'static str,
    /// Attribute carrying each row's identifier
    pub id_attr: &'static str,
    /// Class applied to the row while it is dragged
    pub active_class: &'static str,
}

impl Default for SortableOptions {
    fn default() -> Self {
        Self {
            row_selector: "tr",
            id_attr: "data-id",
            active_class: "table-active",
        }
    }
}

/// Identifiers of all rows, top to bottom. Rows without the attribute give "".
pub fn read_order(container: &web_sys::Element, options: &SortableOptions) -> Vec<String> {
    rows(container, options.row_selector)
        .iter()
        .map(|row| row.get_attribute(options.id_attr).unwrap_or_default())
        .collect()
}

fn rows(container: &web_sys::Element, selector: &str) -> Vec<web_sys::HtmlElement> {
    let Ok(list) = container.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

fn listen<F>(row: &web_sys::HtmlElement, event: &str, handler: F)
where
    F: FnMut(web_sys::DragEvent) + 'static,
{
    let cb = Closure::<dyn FnMut(web_sys::DragEvent)>::new(handler);
    let _ = row.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
    cb.forget();
}

/// Make every row in `container` draggable.
///
/// `on_reorder` runs after each drag with the new top-to-bottom order.
/// Returns the number of rows bound.
pub fn bind_sortable_rows<F>(container: &web_sys::Element, options: SortableOptions, on_reorder: F) -> usize
where
    F: Fn(Vec<String>) + 'static,
{
    let session: Rc<RefCell<DragSession<web_sys::HtmlElement>>> = Rc::new(RefCell::new(DragSession::new()));
    let on_reorder = Rc::new(on_reorder);
    let bound = rows(container, options.row_selector);

    for row in &bound {
        row.set_draggable(true);

        {
            let session = session.clone();
            let this = row.clone();
            listen(row, "dragstart", move |ev: web_sys::DragEvent| {
                if let Some(dt) = ev.data_transfer() {
                    let id = this.get_attribute(options.id_attr).unwrap_or_default();
                    let _ = dt.set_data("text/plain", &id);
                }
                let _ = this.class_list().add_1(options.active_class);
                session.borrow_mut().start(this.clone());
            });
        }

        {
            let session = session.clone();
            let this = row.clone();
            let container = container.clone();
            let on_reorder = on_reorder.clone();
            listen(row, "dragend", move |_ev: web_sys::DragEvent| {
                let _ = this.class_list().remove_1(options.active_class);
                if session.borrow_mut().end().is_some() {
                    on_reorder(read_order(&container, &options));
                }
            });
        }

        {
            let session = session.clone();
            let this = row.clone();
            let container = container.clone();
            listen(row, "dragover", move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                let Some(dragged) = session.borrow().over(&this) else {
                    return;
                };
                let rect = this.get_bounding_client_rect();
                let anchor = match placement(f64::from(ev.client_y()), rect.top(), rect.bottom()) {
                    Placement::After => this.next_sibling(),
                    Placement::Before => Some(this.clone().into()),
                };
                let _ = container.insert_before(&dragged, anchor.as_ref());
            });
        }
    }

    bound.len()
}
