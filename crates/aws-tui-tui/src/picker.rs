// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::view::{Intent, View, ViewContext};
use crate::views::view_for_endpoint;
use crate::widgets::draw_tree;
use anyhow::Result;
use aws_tui_app::{
    Chord, Endpoint, KeyAction, NodeId, SettingsStore, TreeEvent, TreeModel, TypeAhead, endpoints,
    services,
};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

const ADD_FAVORITE: &str = "add-favorite";
const REMOVE_FAVORITE: &str = "remove-favorite";

/// Root page: favorites plus every catalog service.
pub struct ServicePicker {
    tree: TreeModel<Endpoint>,
    search: TypeAhead,
    favorites: Option<NodeId>,
    services: NodeId,
}

impl ServicePicker {
    pub fn new(settings: &SettingsStore) -> Self {
        let (tree, favorites, services) = build_tree(settings);
        let mut picker = Self {
            tree,
            search: TypeAhead::default(),
            favorites,
            services,
        };
        picker.focus_default();
        picker
    }

    pub fn tree(&self) -> &TreeModel<Endpoint> {
        &self.tree
    }

    pub fn search(&self) -> &TypeAhead {
        &self.search
    }

    pub fn favorites_node(&self) -> Option<NodeId> {
        self.favorites
    }

    pub fn services_node(&self) -> NodeId {
        self.services
    }

    /// Discards the tree and rebuilds it. Service categories come back
    /// collapsed.
    fn rebuild(&mut self, settings: &SettingsStore) {
        let (tree, favorites, services) = build_tree(settings);
        self.tree = tree;
        self.favorites = favorites;
        self.services = services;
    }

    fn first_favorite(&self) -> Option<NodeId> {
        self.favorites
            .and_then(|section| self.tree.node(section).children.first().copied())
    }

    fn focus_default(&mut self) {
        let target = self.first_favorite().unwrap_or(self.services);
        self.tree.select(target);
    }

    fn add_favorite(&mut self, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        let Some(endpoint) = self.tree.selected_node().and_then(|node| node.reference) else {
            return Vec::new();
        };
        let reference = endpoint.reference();
        let mut intents = Vec::new();
        if let Err(error) = cx.settings.add_favorite(&reference) {
            tracing::warn!(favorite = %reference, error = %error, "save favorites failed");
            intents.push(Intent::Status(format!("Failed to save favorites: {error:#}")));
        }
        self.rebuild(cx.settings);
        let refocus = self.favorites.and_then(|section| {
            self.tree
                .node(section)
                .children
                .iter()
                .copied()
                .find(|child| self.tree.node(*child).reference == Some(endpoint))
        });
        match refocus {
            Some(node) => self.tree.select(node),
            None => self.focus_default(),
        }
        intents
    }

    fn remove_favorite(&mut self, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        let Some(selected) = self.tree.selected() else {
            return Vec::new();
        };
        let node = self.tree.node(selected);
        let (Some(endpoint), Some(parent)) = (node.reference, node.parent) else {
            return Vec::new();
        };
        if Some(parent) != self.favorites {
            return Vec::new();
        }
        let reference = endpoint.reference();
        let mut intents = Vec::new();
        if let Err(error) = cx.settings.remove_favorite(&reference) {
            tracing::warn!(favorite = %reference, error = %error, "save favorites failed");
            intents.push(Intent::Status(format!("Failed to save favorites: {error:#}")));
        }
        self.rebuild(cx.settings);
        self.focus_default();
        intents
    }
}

fn build_tree(settings: &SettingsStore) -> (TreeModel<Endpoint>, Option<NodeId>, NodeId) {
    let mut tree = TreeModel::new("AWS", false);
    let root = tree.root();

    let known = settings
        .favorites()
        .iter()
        .filter_map(|reference| Endpoint::parse_reference(reference))
        .collect::<Vec<_>>();
    let favorites = if known.is_empty() {
        None
    } else {
        let section = tree.add_child(root, "Favorites", None, false);
        tree.set_expanded(section, true);
        for endpoint in known {
            tree.add_child(section, endpoint.favorite_label(), Some(endpoint), true);
        }
        Some(section)
    };

    let section = tree.add_child(root, "Services", None, false);
    tree.set_expanded(section, true);
    for service in services() {
        let category = tree.add_child(section, service, None, true);
        for endpoint in endpoints(service) {
            tree.add_child(category, endpoint.view(), Some(endpoint), true);
        }
    }
    (tree, favorites, section)
}

impl View for ServicePicker {
    fn service(&self) -> &str {
        "Services"
    }

    fn labels(&self) -> Vec<String> {
        Vec::new()
    }

    fn key_actions(&self) -> Vec<KeyAction> {
        vec![
            KeyAction::local(Chord::ch('d'), "Add to Favorites", ADD_FAVORITE),
            KeyAction::local(Chord::ch('x'), "Remove from Favorites", REMOVE_FAVORITE),
        ]
    }

    /// The picker's content only changes through favorite mutations, which
    /// rebuild it directly.
    fn render(&mut self, _cx: &mut ViewContext<'_>) -> Result<()> {
        Ok(())
    }

    fn handle_key(&mut self, chord: Chord, _cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match self.tree.handle_key(chord, &mut self.search) {
            TreeEvent::SearchChanged { token } => vec![Intent::SearchPending { token }],
            TreeEvent::Activated(id) => match self.tree.node(id).reference {
                Some(endpoint) => vec![Intent::Push(view_for_endpoint(endpoint))],
                None => Vec::new(),
            },
            TreeEvent::Ignored | TreeEvent::Moved | TreeEvent::Toggled { .. } => Vec::new(),
        }
    }

    fn on_action(&mut self, id: &'static str, cx: &mut ViewContext<'_>) -> Vec<Intent> {
        match id {
            ADD_FAVORITE => self.add_favorite(cx),
            REMOVE_FAVORITE => self.remove_favorite(cx),
            _ => Vec::new(),
        }
    }

    fn captures_text(&self) -> bool {
        self.search.is_active()
    }

    fn expire_search(&mut self, token: u64) -> bool {
        self.search.expire(token)
    }

    fn search_title(&self) -> Option<String> {
        self.search.title()
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect) {
        draw_tree(frame, area, &self.tree, |node| {
            if node.reference.is_some() {
                Style::default().fg(Color::White)
            } else {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            }
        });
    }
}
