use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// Attribute name to value. Keys are kept sorted so output is stable.
pub type Attrs = BTreeMap<String, String>;

pub fn attrs(pairs: &[(&str, &str)]) -> Attrs {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrTarget {
    Graph,
    Node,
    Edge,
}

impl AttrTarget {
    pub fn keyword(self) -> &'static str {
        match self {
            AttrTarget::Graph => "graph",
            AttrTarget::Node => "node",
            AttrTarget::Edge => "edge",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeDecl {
    pub id: String,
    pub label: String,
    pub attrs: Attrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub attrs: Attrs,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign(String, String),
    Defaults(AttrTarget, Attrs),
    Node(NodeDecl),
    Edge(Edge),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Digraph {
    pub name: String,
    pub comment: Option<String>,
    pub body: Vec<Stmt>,
}

impl Digraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            body: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn attr(&mut self, key: &str, value: &str) {
        self.body
            .push(Stmt::Assign(key.to_string(), value.to_string()));
    }

    pub fn defaults(&mut self, target: AttrTarget, attrs: Attrs) {
        self.body.push(Stmt::Defaults(target, attrs));
    }

    pub fn node(&mut self, id: &str, label: &str, attrs: Attrs) {
        self.body.push(Stmt::Node(NodeDecl {
            id: id.to_string(),
            label: label.to_string(),
            attrs,
        }));
    }

    pub fn edge(&mut self, from: &str, to: &str) {
        self.body.push(Stmt::Edge(Edge {
            from: from.to_string(),
            to: to.to_string(),
            attrs: Attrs::new(),
        }));
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeDecl> {
        self.body.iter().filter_map(|stmt| match stmt {
            Stmt::Node(n) => Some(n),
            _ => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.body.iter().filter_map(|stmt| match stmt {
            Stmt::Edge(e) => Some(e),
            _ => None,
        })
    }

    pub fn node_ids(&self) -> BTreeSet<&str> {
        self.nodes().map(|n| n.id.as_str()).collect()
    }

    /// Checks that node ids are unique and that every edge endpoint is a
    /// declared node.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for node in self.nodes() {
            if !seen.insert(node.id.as_str()) {
                return Err(Error::DuplicateNode(node.id.clone()));
            }
        }
        for edge in self.edges() {
            for endpoint in [&edge.from, &edge.to] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(Error::UnknownNode {
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
