use serde::{Deserialize, Serialize};

use super::atom::AtomSpec;

/// A single node in the decomposition tree, discriminated by `node_type`.
///
/// Branch and atom payloads are mutually exclusive: the discriminant decides
/// which fields exist on the wire. Traversal code pattern-matches on the
/// variant instead of inspecting field presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "lowercase")]
pub enum Node {
    Branch(BranchNode),
    Atom(AtomNode),
}

/// How a branch's children relate temporally/logically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orchestration {
    Sequential,
    Parallel,
    Conditional,
    Loop,
}

/// Repetition rule for a `loop` branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopSpec {
    pub iterator: String,
    pub termination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
}

/// A composite node: children composed under a stated orchestration kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchNode {
    pub id: String,
    pub label: String,
    pub description: String,
    pub depth: u32,
    pub parent_id: Option<String>,
    pub orchestration: Orchestration,
    pub orchestration_rationale: String,
    /// Required semantically when `orchestration` is `conditional`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Required when `orchestration` is `loop`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_spec: Option<LoopSpec>,
    pub children: Vec<Node>,
}

/// A leaf node: one indivisible unit of execution.
///
/// `atom_spec` is optional in the typed model so that a structurally broken
/// document still loads and renders; the validator reports the omission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomNode {
    pub id: String,
    pub label: String,
    pub description: String,
    pub depth: u32,
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atom_spec: Option<AtomSpec>,
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Branch(b) => &b.id,
            Node::Atom(a) => &a.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Branch(b) => &b.label,
            Node::Atom(a) => &a.label,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Node::Branch(b) => &b.description,
            Node::Atom(a) => &a.description,
        }
    }

    pub fn depth(&self) -> u32 {
        match self {
            Node::Branch(b) => b.depth,
            Node::Atom(a) => a.depth,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Node::Branch(b) => b.parent_id.as_deref(),
            Node::Atom(a) => a.parent_id.as_deref(),
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    /// Children of this node. Atoms have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Branch(b) => &b.children,
            Node::Atom(_) => &[],
        }
    }

    /// Preorder traversal over this node and all descendants.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    /// Finds a node anywhere in this subtree by its hierarchical id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id() == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    /// Ids of every branch node in this subtree, preorder.
    pub fn branch_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.visit(&mut |node| {
            if node.is_branch() {
                ids.push(node.id().to_string());
            }
        });
        ids
    }

    /// Ids of branch nodes whose depth is at or above the given limit.
    pub fn branch_ids_to_depth(&self, max_depth: u32) -> Vec<String> {
        let mut ids = Vec::new();
        self.visit(&mut |node| {
            if node.is_branch() && node.depth() <= max_depth {
                ids.push(node.id().to_string());
            }
        });
        ids
    }
}
