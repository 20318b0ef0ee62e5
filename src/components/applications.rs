//! Applications Review
//!
//! Approve buttons ask for confirmation; pages listing application cards
//! resync on an interval.

use gloo_timers::callback::Interval;

use crate::context::PageContext;
use crate::dom;

const APPROVE_PROMPT: &str = "Are you sure you want to approve this application? This will create a candidate record.";

/// Interval in milliseconds, `None` disables auto-refresh
pub fn refresh_period_ms(secs: u32) -> Option<u32> {
    (secs > 0).then(|| secs.saturating_mul(1000))
}

pub fn wire(ctx: &PageContext) {
    for btn in dom::query_all(".btn-approve") {
        dom::listen(&btn, "click", |ev: web_sys::MouseEvent| {
            if !dom::confirm(APPROVE_PROMPT) {
                ev.prevent_default();
            }
        });
    }

    if dom::query(".application-card").is_none() {
        return;
    }
    let Some(period) = refresh_period_ms(ctx.config().auto_refresh_secs) else {
        return;
    };
    log::debug!(target: "applications", "auto-refresh every {} ms", period);
    let ctx = ctx.clone();
    Interval::new(period, move || ctx.resync()).forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_period() {
        assert_eq!(refresh_period_ms(30), Some(30_000));
        assert_eq!(refresh_period_ms(0), None);
    }
}
