//! User Search Autocomplete
//!
//! Search-as-you-type under the user list's search box. Input is debounced,
//! short queries never reach the server, and a repeat of the last issued
//! query is skipped. The dropdown is a small Leptos view mounted next to
//! the server-rendered input.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::context::PageContext;
use crate::dom;
use crate::models::UserHit;

const SEARCH_SELECTOR: &str = "input[name=\"search\"]";
const MENU_STYLE: &str =
    "position: absolute; top: 100%; left: 0; right: 0; z-index: 1050; max-height: 260px; overflow-y: auto;";

/// What to do with the input once the debounce window has passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// Too short: close the list, no request
    Clear,
    /// Same as the last issued query
    Skip,
    Fetch { query: String, seq: u64 },
}

impl QueryPlan {
    /// Only a clear changes what the menu shows
    pub fn changes_view(&self) -> bool {
        matches!(self, QueryPlan::Clear)
    }
}

/// Per-widget state: last issued query, results and highlight
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutocompleteState {
    last_query: String,
    /// Sequence number of the newest request whose results may be shown
    current: u64,
    results: Vec<UserHit>,
    highlighted: Option<usize>,
    open: bool,
}

impl AutocompleteState {
    pub fn results(&self) -> &[UserHit] {
        &self.results
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn plan(&mut self, raw: &str, min_chars: usize) -> QueryPlan {
        let query = raw.trim();
        if query.chars().count() < min_chars {
            // Anything still in flight is for a query the user abandoned
            self.current += 1;
            self.clear();
            return QueryPlan::Clear;
        }
        if query == self.last_query {
            return QueryPlan::Skip;
        }
        self.last_query = query.to_string();
        self.current += 1;
        QueryPlan::Fetch { query: query.to_string(), seq: self.current }
    }

    /// Show results for request `seq`. Older responses are dropped.
    pub fn apply_results(&mut self, seq: u64, hits: Vec<UserHit>) -> bool {
        if seq != self.current {
            return false;
        }
        self.results = hits;
        self.highlighted = None;
        self.open = !self.results.is_empty();
        true
    }

    pub fn fail(&mut self, seq: u64) {
        if seq == self.current {
            self.clear();
        }
    }

    /// Close and empty the list. The next query is fetched even if it
    /// repeats the last one.
    pub fn clear(&mut self) {
        self.last_query.clear();
        self.results.clear();
        self.highlighted = None;
        self.open = false;
    }

    /// Focus brings back a list that still has entries
    pub fn reopen(&mut self) {
        self.open = !self.results.is_empty();
    }

    pub fn move_down(&mut self) {
        let len = self.results.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1) % len,
        });
    }

    pub fn move_up(&mut self) {
        let len = self.results.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None | Some(0) => len - 1,
            Some(i) => i - 1,
        });
    }
}

fn search_input() -> Option<web_sys::HtmlInputElement> {
    dom::query(SEARCH_SELECTOR)?.dyn_into().ok()
}

/// Fill the search box with a hit and submit the filter form
fn pick(state: RwSignal<AutocompleteState>, index: usize) {
    let Some(hit) = state.with_untracked(|s| s.results().get(index).cloned()) else {
        return;
    };
    state.update(|s| s.clear());
    let Some(input) = search_input() else { return };
    input.set_value(hit.fill_text());
    let form = input
        .closest("form")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlFormElement>().ok());
    if let Some(form) = form {
        dom::request_submit(&form);
    }
}

#[component]
fn ResultsMenu(state: RwSignal<AutocompleteState>) -> impl IntoView {
    view! {
        <div
            class="list-group shadow-sm"
            role="listbox"
            style=move || format!("{} display: {};", MENU_STYLE, if state.with(|s| s.is_open()) { "block" } else { "none" })
        >
            {move || {
                let (hits, highlighted) = state.with(|s| (s.results().to_vec(), s.highlighted()));
                hits.into_iter().enumerate().map(|(i, hit)| {
                    view! {
                        <button
                            type="button"
                            role="option"
                            class=if highlighted == Some(i) { "list-group-item list-group-item-action active" } else { "list-group-item list-group-item-action" }
                            on:click=move |_| pick(state, i)
                        >
                            {hit.text}
                        </button>
                    }
                }).collect_view()
            }}
        </div>
    }
}

fn run_query(state: RwSignal<AutocompleteState>, endpoint: String, min_chars: usize, raw: String) {
    let plan = state.try_maybe_update(|s| {
        let plan = s.plan(&raw, min_chars);
        (plan.changes_view(), plan)
    });
    let Some(QueryPlan::Fetch { query, seq }) = plan else {
        return;
    };
    spawn_local(async move {
        match commands::autocomplete_users(&endpoint, &query).await {
            Ok(hits) => state.update(|s| {
                if !s.apply_results(seq, hits) {
                    log::debug!(target: "autocomplete", "dropped stale results for {:?}", query);
                }
            }),
            Err(e) => {
                log::warn!(target: "autocomplete", "lookup {:?} failed: {}", query, e);
                state.update(|s| s.fail(seq));
            }
        }
    });
}

pub fn wire(ctx: &PageContext) {
    let Some(input) = search_input() else {
        return;
    };
    let Some(parent) = input.parent_element().and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok()) else {
        return;
    };

    let positioned = dom::window()
        .and_then(|win| win.get_computed_style(&parent).ok().flatten())
        .and_then(|style| style.get_property_value("position").ok());
    if positioned.as_deref() == Some("static") {
        let _ = parent.style().set_property("position", "relative");
    }

    let state = RwSignal::new(AutocompleteState::default());
    leptos::mount::mount_to(parent.clone(), move || view! { <ResultsMenu state=state /> }).forget();

    let config = ctx.config();
    let endpoint = config.endpoints.user_autocomplete.clone();
    let min_chars = config.autocomplete_min_chars;
    let debounce_ms = config.autocomplete_debounce_ms;
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

    {
        let this = input.clone();
        dom::listen(&input, "input", move |_ev: web_sys::Event| {
            let raw = this.value();
            let endpoint = endpoint.clone();
            // Replacing the handle drops (cancels) the previous timer
            *pending.borrow_mut() = Some(Timeout::new(debounce_ms, move || {
                run_query(state, endpoint, min_chars, raw);
            }));
        });
    }

    dom::listen(&input, "focus", move |_ev: web_sys::FocusEvent| state.update(|s| s.reopen()));

    dom::listen(&input, "keydown", move |ev: web_sys::KeyboardEvent| {
        if !state.with_untracked(|s| s.is_open()) {
            return;
        }
        match ev.key().as_str() {
            "ArrowDown" => {
                ev.prevent_default();
                state.update(|s| s.move_down());
            }
            "ArrowUp" => {
                ev.prevent_default();
                state.update(|s| s.move_up());
            }
            "Enter" => {
                if let Some(i) = state.with_untracked(|s| s.highlighted()) {
                    ev.prevent_default();
                    pick(state, i);
                }
            }
            "Escape" => state.update(|s| s.clear()),
            _ => {}
        }
    });

    if let Some(doc) = dom::document() {
        let container = parent.clone();
        dom::listen(&doc, "click", move |ev: web_sys::MouseEvent| {
            let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
            if !container.contains(target.as_ref()) && state.with_untracked(|s| s.is_open()) {
                state.update(|s| s.clear());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(n: usize) -> Vec<UserHit> {
        (0..n)
            .map(|i| UserHit { text: format!("User {}", i), display_name: None, username: Some(format!("user{}", i)) })
            .collect()
    }

    fn fetched(state: &mut AutocompleteState, q: &str) -> u64 {
        match state.plan(q, 2) {
            QueryPlan::Fetch { seq, .. } => seq,
            other => panic!("expected fetch for {:?}, got {:?}", q, other),
        }
    }

    #[test]
    fn test_short_queries_never_fetch() {
        let mut state = AutocompleteState::default();
        assert_eq!(state.plan("", 2), QueryPlan::Clear);
        assert_eq!(state.plan("a", 2), QueryPlan::Clear);
        assert_eq!(state.plan("  a  ", 2), QueryPlan::Clear);
        assert_eq!(state.plan("ñ", 2), QueryPlan::Clear);
    }

    #[test]
    fn test_short_query_clears_list() {
        let mut state = AutocompleteState::default();
        let seq = fetched(&mut state, "an");
        state.apply_results(seq, hits(3));
        assert!(state.is_open());

        state.plan("a", 2);
        assert!(!state.is_open());
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_repeat_query_fetches_once() {
        let mut state = AutocompleteState::default();
        assert_eq!(state.plan("ana", 2), QueryPlan::Fetch { query: "ana".into(), seq: 1 });
        assert_eq!(state.plan("ana", 2), QueryPlan::Skip);
        assert_eq!(state.plan(" ana ", 2), QueryPlan::Skip);
        assert_eq!(state.plan("anab", 2), QueryPlan::Fetch { query: "anab".into(), seq: 2 });
    }

    #[test]
    fn test_retype_after_short_query_fetches_again() {
        let mut state = AutocompleteState::default();
        let first = fetched(&mut state, "ana");
        assert_eq!(state.plan("a", 2), QueryPlan::Clear);
        let again = fetched(&mut state, "ana");
        assert!(again > first);

        assert!(!state.apply_results(first, hits(2)));
        assert!(state.apply_results(again, hits(2)));
        assert!(state.is_open());
    }

    #[test]
    fn test_closed_list_can_be_fetched_again() {
        let mut state = AutocompleteState::default();
        let seq = fetched(&mut state, "mar");
        state.apply_results(seq, hits(2));
        state.clear();
        assert!(matches!(state.plan("mar", 2), QueryPlan::Fetch { .. }));
    }

    #[test]
    fn test_only_clear_changes_view() {
        let mut state = AutocompleteState::default();
        assert!(!state.plan("ana", 2).changes_view());
        assert!(!state.plan("ana", 2).changes_view());
        assert!(state.plan("a", 2).changes_view());
    }

    #[test]
    fn test_down_from_nothing_selects_first_and_wraps() {
        let mut state = AutocompleteState::default();
        let seq = fetched(&mut state, "cr");
        state.apply_results(seq, hits(3));
        assert_eq!(state.highlighted(), None);

        state.move_down();
        assert_eq!(state.highlighted(), Some(0));
        state.move_down();
        state.move_down();
        assert_eq!(state.highlighted(), Some(2));
        state.move_down();
        assert_eq!(state.highlighted(), Some(0));
    }

    #[test]
    fn test_up_wraps_to_last() {
        let mut state = AutocompleteState::default();
        let seq = fetched(&mut state, "cr");
        state.apply_results(seq, hits(3));

        state.move_up();
        assert_eq!(state.highlighted(), Some(2));
        state.move_up();
        assert_eq!(state.highlighted(), Some(1));
    }

    #[test]
    fn test_navigation_on_empty_list_is_noop() {
        let mut state = AutocompleteState::default();
        state.move_down();
        state.move_up();
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = AutocompleteState::default();
        let slow = fetched(&mut state, "ma");
        let fast = fetched(&mut state, "mar");

        assert!(state.apply_results(fast, hits(1)));
        assert!(!state.apply_results(slow, hits(4)));
        assert_eq!(state.results().len(), 1);
    }

    #[test]
    fn test_response_after_clear_is_dropped() {
        let mut state = AutocompleteState::default();
        let seq = fetched(&mut state, "jo");
        state.plan("j", 2);
        assert!(!state.apply_results(seq, hits(2)));
        assert!(!state.is_open());
    }

    #[test]
    fn test_empty_results_close_list() {
        let mut state = AutocompleteState::default();
        let seq = fetched(&mut state, "zz");
        state.apply_results(seq, Vec::new());
        assert!(!state.is_open());
        state.reopen();
        assert!(!state.is_open());
    }

    #[test]
    fn test_failure_clears_only_current() {
        let mut state = AutocompleteState::default();
        let first = fetched(&mut state, "li");
        let second = fetched(&mut state, "lim");
        state.apply_results(second, hits(2));

        state.fail(first);
        assert_eq!(state.results().len(), 2);
        state.fail(second);
        assert!(state.results().is_empty());
    }
}
