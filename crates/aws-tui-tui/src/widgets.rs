// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use aws_tui_app::{FilterPhase, FilterTable, TreeModel, TreeNode};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
};

pub fn draw_filter_table(frame: &mut Frame<'_>, area: Rect, table: &FilterTable) {
    let filter_line = match table.phase() {
        FilterPhase::Browsing => None,
        FilterPhase::Editing => Some(Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Cyan)),
            Span::raw(table.input().to_owned()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])),
        FilterPhase::Committed => table
            .filter_label()
            .map(|label| Line::from(Span::styled(label, Style::default().fg(Color::Cyan)))),
    };

    let table_area = match filter_line {
        Some(line) => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(area);
            frame.render_widget(Paragraph::new(line), parts[0]);
            parts[1]
        }
        None => area,
    };

    let columns = table.headers().len().max(1);
    let widths = vec![Constraint::Min(8); columns];
    let header = Row::new(table.headers().iter().map(|label| {
        Cell::from(label.clone()).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }));
    let rows = table
        .displayed_rows()
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.clone()))))
        .collect::<Vec<_>>();

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = TableState::default().with_selected(table.selected());
    frame.render_stateful_widget(widget, table_area, &mut state);
}

/// Draws the visible rows of `tree`, indented by depth. `style_for` picks a
/// per-node style.
pub fn draw_tree<R>(
    frame: &mut Frame<'_>,
    area: Rect,
    tree: &TreeModel<R>,
    style_for: impl Fn(&TreeNode<R>) -> Style,
) {
    let rows = tree.visible_rows();
    let selected = tree
        .selected()
        .and_then(|id| rows.iter().position(|(row, _)| *row == id));
    let items = rows
        .iter()
        .map(|(id, depth)| {
            let node = tree.node(*id);
            let marker = match (node.children.is_empty(), node.expanded) {
                (true, _) => "  ",
                (false, true) => "- ",
                (false, false) => "+ ",
            };
            let text = format!("{}{marker}{}", "  ".repeat(*depth), node.label);
            ListItem::new(Line::from(Span::styled(text, style_for(node))))
        })
        .collect::<Vec<_>>();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn draw_modal(frame: &mut Frame<'_>, message: &str) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);
    let body = vec![
        Line::from(message.to_owned()),
        Line::from(""),
        Line::from(Span::styled(
            "[ OK ]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    ];
    let modal = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(modal, area);
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
