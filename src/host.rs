use serde::Serialize;

use crate::error::HostError;
use crate::folder_tree::BookmarkNode;

/// Arguments for `bookmarks.create`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateDetails {
    pub title: String,
    pub url: String,
    pub parent_id: String,
}

/// The slice of the browser's bookmark and action APIs the extension relies on.
///
/// Futures are not `Send`: every implementation runs on the page's event loop.
#[allow(async_fn_in_trait)]
pub trait BookmarksHost {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, HostError>;
    async fn get(&self, id: &str) -> Result<Vec<BookmarkNode>, HostError>;
    async fn create(&self, details: CreateDetails) -> Result<BookmarkNode, HostError>;
    async fn open_popup(&self) -> Result<(), HostError>;
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::*;

    /// In-memory host. `None` fields make the matching call fail.
    #[derive(Default)]
    pub(crate) struct FakeHost {
        pub tree: Option<Vec<BookmarkNode>>,
        pub by_id: Vec<BookmarkNode>,
        pub create_fails: bool,
        pub popup_fails: bool,
        pub created: RefCell<Vec<CreateDetails>>,
        pub popups_opened: RefCell<usize>,
    }

    impl FakeHost {
        pub(crate) fn failing() -> Self {
            Self {
                create_fails: true,
                popup_fails: true,
                ..Self::default()
            }
        }

        pub(crate) fn with_tree(tree: Vec<BookmarkNode>) -> Self {
            Self {
                tree: Some(tree),
                ..Self::default()
            }
        }
    }

    impl BookmarksHost for FakeHost {
        async fn get_tree(&self) -> Result<Vec<BookmarkNode>, HostError> {
            self.tree
                .clone()
                .ok_or_else(|| HostError::Js("getTree unavailable".into()))
        }

        async fn get(&self, id: &str) -> Result<Vec<BookmarkNode>, HostError> {
            let found: Vec<_> = self.by_id.iter().filter(|n| n.id == id).cloned().collect();
            if found.is_empty() {
                return Err(HostError::Js(format!("Bookmark not found: {id}")));
            }
            Ok(found)
        }

        async fn create(&self, details: CreateDetails) -> Result<BookmarkNode, HostError> {
            if self.create_fails {
                return Err(HostError::Js("create refused".into()));
            }
            let node = BookmarkNode {
                id: format!("new-{}", self.created.borrow().len()),
                title: details.title.clone(),
                url: Some(details.url.clone()),
                parent_id: Some(details.parent_id.clone()),
                children: None,
            };
            self.created.borrow_mut().push(details);
            Ok(node)
        }

        async fn open_popup(&self) -> Result<(), HostError> {
            if self.popup_fails {
                return Err(HostError::Js("openPopup requires a user gesture".into()));
            }
            *self.popups_opened.borrow_mut() += 1;
            Ok(())
        }
    }
}
