use crate::host::BookmarksHost;

/// Used whenever the toolbar folder cannot be located.
pub const FALLBACK_TOOLBAR_ID: &str = "1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserFlavor {
    Firefox,
    Chromium,
}

impl BrowserFlavor {
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.contains("Firefox") {
            BrowserFlavor::Firefox
        } else {
            BrowserFlavor::Chromium
        }
    }

    pub fn detect() -> Self {
        Self::from_user_agent(&crate::browser::user_agent())
    }

    pub fn toolbar_strategy(self) -> ToolbarStrategy {
        match self {
            BrowserFlavor::Firefox => ToolbarStrategy {
                well_known_id: Some("toolbar_____"),
                root_child_index: 1,
            },
            BrowserFlavor::Chromium => ToolbarStrategy {
                well_known_id: None,
                root_child_index: 0,
            },
        }
    }
}

/// Where each browser keeps its bookmark toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolbarStrategy {
    pub well_known_id: Option<&'static str>,
    /// Position of the toolbar among the root node's children.
    pub root_child_index: usize,
}

/// Find the toolbar folder id: well-known id, then tree position, then `"1"`.
pub async fn resolve_toolbar_id<H: BookmarksHost>(host: &H, flavor: BrowserFlavor) -> String {
    let strategy = flavor.toolbar_strategy();

    if let Some(id) = strategy.well_known_id {
        match host.get(id).await {
            Ok(nodes) if !nodes.is_empty() => return nodes[0].id.clone(),
            Ok(_) => log::warn!("toolbar {id} not found"),
            Err(err) => log::warn!("toolbar lookup by id failed: {err}"),
        }
    }

    match host.get_tree().await {
        Ok(tree) => {
            let positional = tree
                .first()
                .and_then(|root| root.children.as_ref())
                .and_then(|children| children.get(strategy.root_child_index))
                .map(|node| node.id.clone());
            if let Some(id) = positional {
                return id;
            }
            log::warn!("bookmark tree has no toolbar at index {}", strategy.root_child_index);
        }
        Err(err) => log::error!("Error finding bookmark toolbar: {err}"),
    }

    FALLBACK_TOOLBAR_ID.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder_tree::tests::{folder, sample_tree};
    use crate::folder_tree::BookmarkNode;
    use crate::host::tests::FakeHost;
    use futures::executor::block_on;

    fn firefox_tree() -> Vec<BookmarkNode> {
        vec![BookmarkNode {
            id: "root________".into(),
            children: Some(vec![
                folder("menu________", "root________", "Bookmarks Menu", vec![]),
                folder("toolbar_____", "root________", "Bookmarks Toolbar", vec![]),
                folder("unfiled_____", "root________", "Other Bookmarks", vec![]),
            ]),
            ..BookmarkNode::default()
        }]
    }

    #[test]
    fn strategy_per_flavor() {
        assert_eq!(BrowserFlavor::Firefox.toolbar_strategy().root_child_index, 1);
        assert_eq!(BrowserFlavor::Chromium.toolbar_strategy().well_known_id, None);
        assert_eq!(
            BrowserFlavor::from_user_agent("Mozilla/5.0 (X11; Linux) Gecko/20100101 Firefox/128.0"),
            BrowserFlavor::Firefox
        );
        assert_eq!(
            BrowserFlavor::from_user_agent("Mozilla/5.0 (X11) Chrome/126.0 Safari/537.36"),
            BrowserFlavor::Chromium
        );
    }

    #[test]
    fn firefox_prefers_well_known_id() {
        let host = FakeHost {
            by_id: vec![folder("toolbar_____", "root________", "Bookmarks Toolbar", vec![])],
            ..FakeHost::default()
        };
        assert_eq!(block_on(resolve_toolbar_id(&host, BrowserFlavor::Firefox)), "toolbar_____");
    }

    #[test]
    fn firefox_falls_back_to_second_root_child() {
        let host = FakeHost::with_tree(firefox_tree());
        assert_eq!(block_on(resolve_toolbar_id(&host, BrowserFlavor::Firefox)), "toolbar_____");
    }

    #[test]
    fn chromium_uses_first_root_child() {
        let host = FakeHost::with_tree(sample_tree());
        assert_eq!(block_on(resolve_toolbar_id(&host, BrowserFlavor::Chromium)), "1");

        let host = FakeHost::with_tree(firefox_tree());
        assert_eq!(block_on(resolve_toolbar_id(&host, BrowserFlavor::Chromium)), "menu________");
    }

    #[test]
    fn falls_back_when_host_fails() {
        let host = FakeHost::failing();
        assert_eq!(block_on(resolve_toolbar_id(&host, BrowserFlavor::Firefox)), FALLBACK_TOOLBAR_ID);
        assert_eq!(block_on(resolve_toolbar_id(&host, BrowserFlavor::Chromium)), FALLBACK_TOOLBAR_ID);
    }

    #[test]
    fn falls_back_on_short_tree() {
        let host = FakeHost::with_tree(vec![BookmarkNode {
            id: "0".into(),
            children: Some(vec![]),
            ..BookmarkNode::default()
        }]);
        assert_eq!(block_on(resolve_toolbar_id(&host, BrowserFlavor::Chromium)), "1");
    }
}
