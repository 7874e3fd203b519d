use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::KeyboardEvent;

use crate::background::handle_request;
use crate::browser::{self, WebExtensionHost};
use crate::folder_search::{highlight_spans, initial_highlight, search_folders, SearchResultItem};
use crate::folder_tree::{BookmarkFolder, FolderTree};
use crate::messages::{Notification, Request};
use crate::navigation::{KeyboardNavigator, NavKey, NavigationCallbacks};
use crate::scroll::ScrollScheduler;
use crate::settings::Settings;
use crate::toolbar::BrowserFlavor;

/// What a key press or click asks the popup to do once navigation state is settled.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PopupAction {
    SaveInto(String),
    SaveToToolbar,
    Dismiss,
}

#[derive(Default)]
struct PendingActions(Vec<PopupAction>);

impl NavigationCallbacks for PendingActions {
    fn on_enter(&mut self, item: &SearchResultItem) {
        self.0.push(PopupAction::SaveInto(item.folder.id.clone()));
    }

    fn on_escape(&mut self) {
        self.0.push(PopupAction::Dismiss);
    }

    fn on_emit_enter(&mut self) {
        self.0.push(PopupAction::SaveToToolbar);
    }
}

#[derive(Clone, Copy)]
struct PopupState {
    flavor: BrowserFlavor,
    tree: RwSignal<FolderTree>,
    query: RwSignal<String>,
    results: RwSignal<Vec<SearchResultItem>>,
    nav: RwSignal<KeyboardNavigator>,
    max_results: usize,
}

impl PopupState {
    fn search(&self, text: String) {
        let found = self
            .tree
            .with_untracked(|tree| search_folders(&text, tree.folders(), self.max_results));
        self.nav.update(|nav| {
            nav.reset();
            nav.highlight(initial_highlight(&found));
        });
        self.results.set(found);
        self.query.set(text);
    }

    fn perform(&self, action: PopupAction) {
        match action {
            PopupAction::SaveInto(id) => spawn_local(save_active_tab(Some(id), self.flavor)),
            PopupAction::SaveToToolbar => spawn_local(save_active_tab(None, self.flavor)),
            PopupAction::Dismiss if self.query.with_untracked(String::is_empty) => close_popup(),
            PopupAction::Dismiss => self.search(String::new()),
        }
    }
}

async fn save_active_tab(parent_id: Option<String>, flavor: BrowserFlavor) {
    let tab = match browser::active_tab().await {
        Ok(tab) => tab,
        Err(err) => {
            log::error!("Error reading active tab: {err}");
            return;
        }
    };
    let request = Request::SaveBookmark {
        title: tab.title.clone(),
        url: tab.url.clone(),
        parent_id,
    };
    let response = handle_request(&WebExtensionHost, flavor, request).await;

    let message = if response.success {
        browser::message("bookmarkSaved", "Bookmark saved!")
    } else {
        browser::message("bookmarkSaveFailed", "Error saving bookmark")
    };
    let notification = Notification::ShowNotification {
        message,
        is_error: !response.success,
    };
    if let Some(tab_id) = tab.id {
        // Privileged pages have no content script to receive this.
        if let Err(err) = browser::send_tab_message(tab_id, &notification).await {
            log::warn!("tab {tab_id} not notified: {err}");
        }
    }
    close_popup();
}

fn close_popup() {
    if let Err(err) = window().close() {
        log::debug!("popup close refused: {err:?}");
    }
}

fn highlighted_title(title: &str, query: &str) -> impl IntoView {
    highlight_spans(title, query)
        .into_iter()
        .map(|span| {
            if span.highlighted {
                view! { <mark>{span.text}</mark> }.into_any()
            } else {
                view! { <span>{span.text}</span> }.into_any()
            }
        })
        .collect_view()
}

fn child_rows(state: PopupState, children: Vec<BookmarkFolder>) -> impl IntoView {
    view! {
        <div class="dropdown-children">
            {children.into_iter().map(|child| {
                let id = child.id.clone();
                view! {
                    <div class="dropdown-child" on:click=move |_| state.perform(PopupAction::SaveInto(id.clone()))>
                        {child.title}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

fn result_row(
    state: PopupState,
    item: SearchResultItem,
    query: &str,
    highlighted: bool,
    expanded: bool,
) -> impl IntoView {
    let folder = item.folder;
    let id = folder.id.clone();
    let has_children = folder.has_children();
    let class = if highlighted { "dropdown-item highlighted" } else { "dropdown-item" };

    view! {
        <div class=class on:click=move |_| state.perform(PopupAction::SaveInto(id.clone()))>
            <div class="folder-title">
                {highlighted_title(&folder.title, query)}
                {has_children.then(|| view! { <span class="has-children">"+"</span> })}
            </div>
            {(!folder.path.is_empty()).then(|| view! { <div class="folder-path">{folder.path.clone()}</div> })}
        </div>
        {expanded.then(|| child_rows(state, folder.children))}
    }
}

#[component]
pub fn App(settings: Settings) -> impl IntoView {
    let state = PopupState {
        flavor: BrowserFlavor::detect(),
        tree: RwSignal::new(FolderTree::default()),
        query: RwSignal::new(String::new()),
        results: RwSignal::new(Vec::new()),
        nav: RwSignal::new(KeyboardNavigator::default()),
        max_results: settings.max_results,
    };
    let scroller = ScrollScheduler::default();
    let settle_ms = settings.settle_ms;
    let separator = settings.path_separator;

    Effect::new(move |_| {
        let separator = separator.clone();
        spawn_local(async move {
            let tree = FolderTree::load(&WebExtensionHost, &separator).await;
            state.tree.set(tree);
            // Re-run a query typed before the tree arrived.
            let pending = state.query.get_untracked();
            if !pending.trim().is_empty() {
                state.search(pending);
            }
        });
    });

    let on_keydown = move |ev: KeyboardEvent| {
        let key = NavKey::from_key(&ev.key(), ev.shift_key());
        let mut pending = PendingActions::default();
        let mut nav = state.nav.get_untracked();
        let outcome = state
            .results
            .with_untracked(|results| nav.handle_key(key, results, &mut pending));
        if nav != state.nav.get_untracked() {
            state.nav.set(nav);
        }

        if outcome.prevent_default {
            ev.prevent_default();
        }
        if let Some(timing) = outcome.scroll {
            scroller.schedule(timing, settle_ms);
        }
        for action in pending.0 {
            state.perform(action);
        }
    };

    let rows = move || {
        let query = state.query.get();
        let nav = state.nav.get();
        state
            .results
            .get()
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                let expanded = nav.is_expanded(&item.folder.id);
                result_row(state, item, &query, nav.highlighted() == Some(idx), expanded)
            })
            .collect_view()
    };

    view! {
        <main class="popup">
            <input
                class="search-input"
                type="text"
                autofocus=true
                spellcheck="false"
                placeholder=browser::message("searchPlaceholder", "Search bookmark folders")
                prop:value=move || state.query.get()
                on:input=move |ev| state.search(event_target_value(&ev))
                on:keydown=on_keydown
            />
            <Show when=move || state.results.with(|r| !r.is_empty())>
                <div class="dropdown-container">{rows}</div>
            </Show>
        </main>
    }
}

pub fn mount(settings: Settings) {
    leptos::mount::mount_to_body(move || view! { <App settings=settings /> });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder_search::ResultKind;

    fn item(id: &str) -> SearchResultItem {
        SearchResultItem {
            folder: BookmarkFolder {
                id: id.into(),
                title: id.into(),
                path: String::new(),
                parent_id: None,
                children: Vec::new(),
            },
            kind: ResultKind::Match,
        }
    }

    #[test]
    fn keys_translate_to_popup_actions() {
        let results = vec![item("a"), item("b")];
        let mut nav = KeyboardNavigator::default();
        let mut pending = PendingActions::default();

        nav.handle_key(NavKey::Enter, &results, &mut pending);
        nav.handle_key(NavKey::ArrowDown, &results, &mut pending);
        nav.handle_key(NavKey::ArrowDown, &results, &mut pending);
        nav.handle_key(NavKey::Enter, &results, &mut pending);
        nav.handle_key(NavKey::Escape, &results, &mut pending);

        assert_eq!(
            pending.0,
            [
                PopupAction::SaveToToolbar,
                PopupAction::SaveInto("b".into()),
                PopupAction::Dismiss
            ]
        );
    }
}
