use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::host::BookmarksHost;

/// Id the host gives the synthetic root of the bookmark tree.
pub const ROOT_ID: &str = "0";

/// A node as returned by `bookmarks.getTree()`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
}

impl BookmarkNode {
    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BookmarkFolder {
    pub id: String,
    pub title: String,
    /// Breadcrumb of ancestor titles, empty for top-level folders.
    pub path: String,
    pub parent_id: Option<String>,
    pub children: Vec<BookmarkFolder>,
}

impl BookmarkFolder {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Flatten `nodes` into every folder they contain, parents before descendants.
pub fn build_folder_tree(
    nodes: &[BookmarkNode],
    parent_path: &str,
    separator: &str,
) -> Vec<BookmarkFolder> {
    let mut folders = Vec::new();

    for node in nodes.iter().filter(|n| n.is_folder()) {
        let mut folder = BookmarkFolder {
            id: node.id.clone(),
            title: node.title.clone(),
            path: parent_path.to_string(),
            parent_id: node.parent_id.clone(),
            children: Vec::new(),
        };

        let Some(children) = node.children.as_deref() else {
            folders.push(folder);
            continue;
        };

        let current_path = if parent_path.is_empty() {
            node.title.clone()
        } else {
            format!("{parent_path}{separator}{}", node.title)
        };
        let descendants = build_folder_tree(children, &current_path, separator);
        folder.children = descendants
            .iter()
            .filter(|child| child.parent_id.as_deref() == Some(node.id.as_str()))
            .cloned()
            .collect();

        folders.push(folder);
        folders.extend(descendants);
    }

    folders
}

/// Drop the synthetic root and untitled folders.
pub fn visible_folders(folders: Vec<BookmarkFolder>) -> Vec<BookmarkFolder> {
    folders
        .into_iter()
        .filter(|f| !f.title.is_empty() && f.id != ROOT_ID)
        .collect()
}

/// Flat, searchable view of the user's folders, rebuilt wholesale on every load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderTree {
    folders: Vec<BookmarkFolder>,
    by_id: HashMap<String, usize>,
}

impl FolderTree {
    pub fn from_nodes(nodes: &[BookmarkNode], separator: &str) -> Self {
        let folders = visible_folders(build_folder_tree(nodes, "", separator));
        let by_id = folders
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.id.clone(), idx))
            .collect();
        Self { folders, by_id }
    }

    /// Fetch the host tree and flatten it. A failed fetch yields an empty tree.
    pub async fn load<H: BookmarksHost>(host: &H, separator: &str) -> Self {
        match host.get_tree().await {
            Ok(nodes) => {
                let tree = Self::from_nodes(&nodes, separator);
                log::debug!("loaded {} bookmark folders", tree.len());
                tree
            }
            Err(err) => {
                log::error!("Error loading folders: {err}");
                Self::default()
            }
        }
    }

    pub fn folders(&self) -> &[BookmarkFolder] {
        &self.folders
    }

    pub fn get(&self, id: &str) -> Option<&BookmarkFolder> {
        self.by_id.get(id).map(|&idx| &self.folders[idx])
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}
