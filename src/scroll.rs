use std::time::Duration;

use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::navigation::{needs_scroll, Bounds, ScrollTiming};

const HIGHLIGHTED_SELECTOR: &str = ".dropdown-item.highlighted";
const CONTAINER_SELECTOR: &str = ".dropdown-container";

/// Deferred "keep the highlighted row visible" check. A newer request cancels the pending one.
#[derive(Clone, Copy)]
pub struct ScrollScheduler {
    pending: StoredValue<Option<TimeoutHandle>>,
}

impl Default for ScrollScheduler {
    fn default() -> Self {
        Self {
            pending: StoredValue::new(None),
        }
    }
}

impl ScrollScheduler {
    pub fn schedule(&self, timing: ScrollTiming, settle_ms: u64) {
        self.cancel();
        let delay = match timing {
            ScrollTiming::NextTick => Duration::ZERO,
            ScrollTiming::AfterSettle => Duration::from_millis(settle_ms),
        };
        let pending = self.pending;
        match set_timeout_with_handle(
            move || {
                pending.set_value(None);
                scroll_to_highlighted();
            },
            delay,
        ) {
            Ok(handle) => self.pending.set_value(Some(handle)),
            Err(err) => log::debug!("scroll not scheduled: {err:?}"),
        }
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.get_value() {
            handle.clear();
            self.pending.set_value(None);
        }
    }
}

fn scroll_to_highlighted() {
    let document = document();
    let (Ok(Some(item)), Ok(Some(container))) = (
        document.query_selector(HIGHLIGHTED_SELECTOR),
        document.query_selector(CONTAINER_SELECTOR),
    ) else {
        return;
    };

    let bounds = |rect: web_sys::DomRect| Bounds {
        top: rect.top(),
        bottom: rect.bottom(),
    };
    if !needs_scroll(
        bounds(item.get_bounding_client_rect()),
        bounds(container.get_bounding_client_rect()),
    ) {
        return;
    }

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Nearest);
    item.scroll_into_view_with_scroll_into_view_options(&options);
}
