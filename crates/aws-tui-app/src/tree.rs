// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::keys::{Chord, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<R> {
    pub label: String,
    pub reference: Option<R>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub expanded: bool,
    pub searchable: bool,
}

/// Arena-backed tree. Document order is the pre-order walk from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeModel<R> {
    nodes: Vec<TreeNode<R>>,
    show_root: bool,
    selected: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEvent {
    Ignored,
    Moved,
    /// The type-ahead buffer changed; `token` identifies the pending clear.
    SearchChanged { token: u64 },
    /// Enter on a node with no loaded children.
    Activated(NodeId),
    /// Enter on an internal node.
    Toggled { expanded: bool },
}

impl<R> TreeModel<R> {
    pub fn new(root_label: impl Into<String>, show_root: bool) -> Self {
        Self {
            nodes: vec![TreeNode {
                label: root_label.into(),
                reference: None,
                parent: None,
                children: Vec::new(),
                expanded: true,
                searchable: false,
            }],
            show_root,
            selected: None,
        }
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &TreeNode<R> {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TreeNode<R> {
        &mut self.nodes[id.0]
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        label: impl Into<String>,
        reference: Option<R>,
        searchable: bool,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            label: label.into(),
            reference,
            parent: Some(parent),
            children: Vec::new(),
            expanded: false,
            searchable,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Detaches the children of `id`. Detached nodes stay in the arena but
    /// are no longer reachable.
    pub fn clear_children(&mut self, id: NodeId) {
        let detached = std::mem::take(&mut self.nodes[id.0].children);
        if let Some(selected) = self.selected
            && detached
                .iter()
                .any(|child| self.is_descendant_or_self(selected, *child))
        {
            self.selected = Some(id);
        }
    }

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        self.nodes[id.0].expanded = expanded;
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&TreeNode<R>> {
        self.selected.map(|id| self.node(id))
    }

    pub fn select(&mut self, id: NodeId) {
        self.selected = Some(id);
    }

    pub fn find(&self, mut predicate: impl FnMut(&TreeNode<R>) -> bool) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|id| predicate(self.node(*id)))
    }

    /// Every reachable node in pre-order, root included.
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        order
    }

    /// Rows currently on screen with their depth.
    pub fn visible_rows(&self) -> Vec<(NodeId, usize)> {
        let mut rows = Vec::new();
        let start_depth = usize::from(self.show_root);
        if self.show_root {
            rows.push((self.root(), 0));
        }
        if self.node(self.root()).expanded {
            self.push_visible(self.root(), start_depth, &mut rows);
        }
        rows
    }

    fn push_visible(&self, id: NodeId, depth: usize, rows: &mut Vec<(NodeId, usize)>) {
        for child in &self.node(id).children {
            rows.push((*child, depth));
            if self.node(*child).expanded {
                self.push_visible(*child, depth + 1, rows);
            }
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let rows = self.visible_rows();
        if rows.is_empty() {
            self.selected = None;
            return;
        }
        let current = self
            .selected
            .and_then(|selected| rows.iter().position(|(id, _)| *id == selected));
        let next = match current {
            Some(position) => position.saturating_add_signed(delta).min(rows.len() - 1),
            None => 0,
        };
        self.selected = Some(rows[next].0);
    }

    pub fn expand_ancestors(&mut self, id: NodeId) {
        let mut cursor = self.node(id).parent;
        while let Some(parent) = cursor {
            self.nodes[parent.0].expanded = true;
            cursor = self.node(parent).parent;
        }
    }

    /// Toggles an internal node; selection moves to its first child when it
    /// opens.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        let node = &mut self.nodes[id.0];
        node.expanded = !node.expanded;
        let expanded = node.expanded;
        if expanded && let Some(first) = node.children.first().copied() {
            self.selected = Some(first);
        }
        expanded
    }

    /// First searchable node, in document order, whose label starts with
    /// `query` ignoring case.
    pub fn find_prefix(&self, query: &str) -> Option<NodeId> {
        let query = query.to_lowercase();
        self.document_order().into_iter().find(|id| {
            let node = self.node(*id);
            node.searchable && node.label.to_lowercase().starts_with(&query)
        })
    }

    pub fn handle_key(&mut self, chord: Chord, search: &mut TypeAhead) -> TreeEvent {
        if let Some(value) = chord.rune() {
            let token = search.push(value);
            self.apply_search(search);
            return TreeEvent::SearchChanged { token };
        }
        match chord.key {
            Key::Backspace if search.is_active() => {
                let token = search.pop();
                self.apply_search(search);
                TreeEvent::SearchChanged { token }
            }
            Key::Esc | Key::Left | Key::Right => {
                search.clear();
                TreeEvent::Moved
            }
            Key::Up => {
                search.clear();
                self.move_selection(-1);
                TreeEvent::Moved
            }
            Key::Down => {
                search.clear();
                self.move_selection(1);
                TreeEvent::Moved
            }
            Key::Home => {
                self.move_selection(isize::MIN);
                TreeEvent::Moved
            }
            Key::End => {
                self.move_selection(isize::MAX);
                TreeEvent::Moved
            }
            Key::Enter => {
                search.clear();
                let Some(selected) = self.selected else {
                    return TreeEvent::Ignored;
                };
                if self.node(selected).children.is_empty() {
                    TreeEvent::Activated(selected)
                } else {
                    TreeEvent::Toggled {
                        expanded: self.toggle(selected),
                    }
                }
            }
            _ => TreeEvent::Ignored,
        }
    }

    fn apply_search(&mut self, search: &TypeAhead) {
        if !search.is_active() {
            return;
        }
        if let Some(found) = self.find_prefix(search.buffer()) {
            self.expand_ancestors(found);
            self.selected = Some(found);
        }
    }

    fn is_descendant_or_self(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.node(current).parent;
        }
        false
    }
}

/// Incremental search buffer. Each change bumps a generation token; a
/// scheduled clear only applies when its token is still current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeAhead {
    buffer: String,
    generation: u64,
}

impl TypeAhead {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_active(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn push(&mut self, value: char) -> u64 {
        self.buffer.push(value);
        self.bump()
    }

    pub fn pop(&mut self) -> u64 {
        self.buffer.pop();
        self.bump()
    }

    pub fn clear(&mut self) {
        if self.is_active() {
            self.buffer.clear();
            self.bump();
        }
    }

    /// Clears the buffer if `token` is the latest generation.
    pub fn expire(&mut self, token: u64) -> bool {
        if token != self.generation || !self.is_active() {
            return false;
        }
        self.buffer.clear();
        true
    }

    /// ` Search: <buffer> ` while searching.
    pub fn title(&self) -> Option<String> {
        self.is_active()
            .then(|| format!(" Search: {} ", self.buffer))
    }

    fn bump(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}
