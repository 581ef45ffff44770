use ahash::AHashSet;

use crate::model::Node;

/// Branch nodes at this depth or above start expanded.
const DEFAULT_EXPAND_DEPTH: u32 = 1;

/// Expansion and selection state for one rendered tree, kept separate from
/// the decomposition data it views.
#[derive(Debug, Default)]
pub struct TreeViewState {
    expanded: AHashSet<String>,
    selected: Option<String>,
}

impl TreeViewState {
    /// Initializes the view with branch nodes at depth 0 and 1 expanded.
    /// Deeper branches stay collapsed until toggled.
    pub fn new(root: &Node) -> Self {
        Self {
            expanded: root.branch_ids_to_depth(DEFAULT_EXPAND_DEPTH).into_iter().collect(),
            selected: None,
        }
    }

    /// Flips the expansion state of exactly one branch; no cascade.
    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    /// Marks every branch in the tree expanded.
    pub fn expand_all(&mut self, root: &Node) {
        self.expanded = root.branch_ids().into_iter().collect();
    }

    /// Clears the expansion set entirely. The root id is cleared too, which
    /// hides the whole tree until re-expanded; confirm with the original
    /// interaction design before special-casing the root here.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Sets the single selected node; `None` clears the selection.
    pub fn select(&mut self, id: Option<String>) {
        self.selected = id;
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }
}
