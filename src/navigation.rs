use crate::folder_search::SearchResultItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    ShiftSpace,
    Enter,
    Escape,
    Other,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value plus the shift state.
    pub fn from_key(key: &str, shift: bool) -> Self {
        match key {
            "ArrowDown" => NavKey::ArrowDown,
            "ArrowUp" => NavKey::ArrowUp,
            " " if shift => NavKey::ShiftSpace,
            "Enter" => NavKey::Enter,
            "Escape" => NavKey::Escape,
            _ => NavKey::Other,
        }
    }
}

/// When the highlighted row should be brought back into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollTiming {
    /// After the next render.
    NextTick,
    /// After an expanded child list has had time to lay out.
    AfterSettle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    pub prevent_default: bool,
    pub scroll: Option<ScrollTiming>,
}

impl KeyOutcome {
    fn handled(scroll: Option<ScrollTiming>) -> Self {
        Self {
            prevent_default: true,
            scroll,
        }
    }
}

pub trait NavigationCallbacks {
    fn on_enter(&mut self, item: &SearchResultItem);
    fn on_escape(&mut self);
    /// Enter pressed with nothing highlighted.
    fn on_emit_enter(&mut self);
}

/// Selection state for the search dropdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardNavigator {
    highlighted: Option<usize>,
    expanded: Option<String>,
}

impl KeyboardNavigator {
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Highlighted position, `-1` when nothing is selected.
    pub fn highlighted_index(&self) -> i32 {
        self.highlighted.map_or(-1, |idx| idx as i32)
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.as_deref() == Some(id)
    }

    pub fn reset(&mut self) {
        self.highlighted = None;
        self.expanded = None;
    }

    pub fn highlight(&mut self, index: Option<usize>) {
        self.highlighted = index;
    }

    pub fn handle_key<C: NavigationCallbacks>(
        &mut self,
        key: NavKey,
        results: &[SearchResultItem],
        callbacks: &mut C,
    ) -> KeyOutcome {
        match key {
            NavKey::ArrowDown => {
                self.expanded = None;
                if let Some(last) = results.len().checked_sub(1) {
                    self.highlighted = Some(self.highlighted.map_or(0, |idx| (idx + 1).min(last)));
                }
                KeyOutcome::handled(Some(ScrollTiming::NextTick))
            }
            NavKey::ArrowUp => {
                self.expanded = None;
                if !results.is_empty() {
                    self.highlighted = Some(self.highlighted.map_or(0, |idx| idx.saturating_sub(1)));
                }
                KeyOutcome::handled(Some(ScrollTiming::NextTick))
            }
            NavKey::ShiftSpace => {
                let current = self.highlighted.and_then(|idx| results.get(idx));
                match current {
                    Some(item) if item.folder.has_children() => {
                        self.expanded = if self.is_expanded(&item.folder.id) {
                            None
                        } else {
                            Some(item.folder.id.clone())
                        };
                        KeyOutcome::handled(Some(ScrollTiming::AfterSettle))
                    }
                    _ => KeyOutcome::handled(None),
                }
            }
            NavKey::Enter => {
                match self.highlighted.and_then(|idx| results.get(idx)) {
                    Some(item) => callbacks.on_enter(item),
                    None => callbacks.on_emit_enter(),
                }
                KeyOutcome::handled(None)
            }
            NavKey::Escape => {
                callbacks.on_escape();
                KeyOutcome::default()
            }
            NavKey::Other => KeyOutcome::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

/// Whether an item sticks out above or below its scroll container.
pub fn needs_scroll(item: Bounds, container: Bounds) -> bool {
    item.top < container.top || item.bottom > container.bottom
}
