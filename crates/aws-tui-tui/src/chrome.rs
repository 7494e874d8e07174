// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::AppRuntime;
use crate::view::View;
use aws_tui_app::{KeyAction, key_grid_lines};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub const FOOTER_HINT: &str =
    "Esc Back | Enter Select | / Filter | Ctrl-R Refresh | Ctrl-T Top | Ctrl-Q Quit";

/// Left half of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityPanel {
    Known {
        account: String,
        aliases: Vec<String>,
        arn: String,
        user_id: String,
        region: String,
    },
    Failed {
        details: String,
        region: String,
    },
}

impl IdentityPanel {
    /// Alias lookup errors are swallowed; identity errors are shown.
    pub fn fetch(runtime: &mut dyn AppRuntime) -> Self {
        let region = runtime
            .region()
            .filter(|region| !region.is_empty())
            .unwrap_or_else(|| "unknown".to_owned());
        match runtime.caller_identity() {
            Ok(identity) => Self::Known {
                aliases: runtime.account_aliases().unwrap_or_default(),
                account: identity.account,
                arn: identity.arn,
                user_id: identity.user_id,
                region,
            },
            Err(error) => {
                tracing::warn!(error = %error, "caller identity lookup failed");
                Self::Failed {
                    details: format!("{error:#}"),
                    region,
                }
            }
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Known {
                account,
                aliases,
                arn,
                user_id,
                region,
            } => {
                let account = if aliases.is_empty() {
                    format!("Account: {account}")
                } else {
                    format!("Account: {account} ({})", aliases.join(", "))
                };
                vec![
                    account,
                    format!("ARN: {arn}"),
                    format!("User ID: {user_id}"),
                    format!("Region: {region}"),
                ]
            }
            Self::Failed { details, region } => vec![
                "Error: Failed to get credentials".to_owned(),
                format!("Details: {details}"),
                format!("Region: {region}"),
            ],
        }
    }
}

/// Header contents, rebuilt on every stack transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub identity: IdentityPanel,
    pub key_lines: Vec<String>,
}

impl Chrome {
    pub fn build(runtime: &mut dyn AppRuntime, actions: &[KeyAction]) -> Self {
        Self {
            identity: IdentityPanel::fetch(runtime),
            key_lines: key_grid_lines(actions),
        }
    }

    pub fn draw_header(&self, frame: &mut Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Min(1)])
            .split(area);

        let identity_style = match self.identity {
            IdentityPanel::Known { .. } => Style::default().fg(Color::White),
            IdentityPanel::Failed { .. } => Style::default().fg(Color::Red),
        };
        let identity = self
            .identity
            .lines()
            .into_iter()
            .map(|line| Line::from(Span::styled(line, identity_style)))
            .collect::<Vec<_>>();
        frame.render_widget(Paragraph::new(identity), columns[0]);

        let keys = self
            .key_lines
            .iter()
            .map(|line| Line::from(Span::styled(line.clone(), Style::default().fg(Color::Cyan))))
            .collect::<Vec<_>>();
        frame.render_widget(Paragraph::new(keys), columns[1]);
    }
}

/// Border title for the main viewport.
pub fn page_title(view: &dyn View) -> String {
    let labels = view.labels();
    if labels.is_empty() {
        format!(" {} ", view.service())
    } else {
        format!(" {} > {} ", view.service(), labels.join(" > "))
    }
}

pub fn draw_footer(frame: &mut Frame<'_>, area: Rect, status: Option<&str>) {
    let footer = match status {
        Some(message) => Paragraph::new(message.to_owned()).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        None => Paragraph::new(FOOTER_HINT).style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::IdentityPanel;
    use crate::testing::TestRuntime;

    #[test]
    fn known_identity_lists_aliases() {
        let panel = IdentityPanel::Known {
            account: "123456789012".to_owned(),
            aliases: vec!["prod".to_owned(), "main".to_owned()],
            arn: "arn:aws:iam::123456789012:user/ops".to_owned(),
            user_id: "AIDA1".to_owned(),
            region: "eu-west-1".to_owned(),
        };
        assert_eq!(
            panel.lines(),
            vec![
                "Account: 123456789012 (prod, main)",
                "ARN: arn:aws:iam::123456789012:user/ops",
                "User ID: AIDA1",
                "Region: eu-west-1",
            ]
        );
    }

    #[test]
    fn failed_identity_keeps_region() {
        let panel = IdentityPanel::Failed {
            details: "no credentials".to_owned(),
            region: "unknown".to_owned(),
        };
        assert_eq!(panel.lines()[0], "Error: Failed to get credentials");
        assert_eq!(panel.lines()[1], "Details: no credentials");
        assert_eq!(panel.lines()[2], "Region: unknown");
    }

    #[test]
    fn fetch_falls_back_to_unknown_region() {
        let mut runtime = TestRuntime::with_sample_data();
        runtime.region = Some(String::new());
        let panel = IdentityPanel::fetch(&mut runtime);
        assert_eq!(panel.lines()[0], "Account: 123456789012 (demo)");
        assert_eq!(panel.lines()[3], "Region: unknown");
    }

    #[test]
    fn fetch_reports_identity_failures() {
        let mut runtime = TestRuntime {
            region: Some("eu-central-1".to_owned()),
            ..TestRuntime::default()
        };
        let panel = IdentityPanel::fetch(&mut runtime);
        assert_eq!(
            panel,
            IdentityPanel::Failed {
                details: "no credentials configured".to_owned(),
                region: "eu-central-1".to_owned(),
            }
        );
    }
}
