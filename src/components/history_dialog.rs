//! History dialog component
//!
//! Saved quotes newest first, with the line items of the selected quote.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::inset;
use crate::model::money::format_money;
use crate::model::quote::Quote;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Scrollbar,
        ScrollbarOrientation, ScrollbarState,
    },
    Frame,
};

/// Quote history dialog
#[derive(Default)]
pub struct HistoryDialog {
    pub selected_index: usize,
    pub detail_scroll: usize,
}

impl Component for HistoryDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ModalDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.detail_scroll = 0;
                }
            }
            Action::ModalDown => {
                self.selected_index += 1;
                self.detail_scroll = 0;
            }
            Action::PageUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(10);
            }
            Action::PageDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(10);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // See draw_with_history
        Ok(())
    }
}

impl HistoryDialog {
    pub fn reset(&mut self) {
        self.selected_index = 0;
        self.detail_scroll = 0;
    }

    pub fn draw_with_history(
        &self,
        frame: &mut Frame,
        area: Rect,
        history: &[Quote],
        currency: &str,
    ) -> Result<()> {
        frame.render_widget(Clear, area);
        let overlay_area = inset(area, 2);

        if history.is_empty() {
            let paragraph = Paragraph::new(
                "No saved quotes yet. Export or email a quote to add it to the history.",
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Quote History ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            );
            frame.render_widget(paragraph, overlay_area);
            return Ok(());
        }

        let selected_idx = self.selected_index.min(history.len() - 1);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(overlay_area);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        let items: Vec<ListItem> = history
            .iter()
            .map(|quote| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", quote.created_at.format("%Y-%m-%d %H:%M")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{:>11} ", format_money(currency, quote.total)),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw(quote.display_customer().to_string()),
                ]))
            })
            .collect();

        let mut list_state = ListState::default().with_selected(Some(selected_idx));
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Quote History ({}) ", history.len()))
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

        frame.render_stateful_widget(list, content_chunks[0], &mut list_state);

        let detail_lines = render_quote_detail(&history[selected_idx], currency);
        let total = detail_lines.len();
        let visible_height = content_chunks[1].height.saturating_sub(2) as usize;
        let scroll = self.detail_scroll.min(total.saturating_sub(visible_height));

        let detail = Paragraph::new(detail_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Details ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .scroll((scroll as u16, 0));

        frame.render_widget(detail, content_chunks[1]);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                content_chunks[1].inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        let key_style = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Esc/h ", key_style(Color::Yellow)),
            Span::raw("Close  "),
            Span::styled(" ↑/↓ ", key_style(Color::Cyan)),
            Span::raw("Select  "),
            Span::styled(" PgUp/PgDn ", key_style(Color::Cyan)),
            Span::raw("Scroll  "),
            Span::styled(" Enter ", key_style(Color::Green)),
            Span::raw("Load into working quote"),
        ]))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(help, main_chunks[1]);

        Ok(())
    }
}

fn render_quote_detail(quote: &Quote, currency: &str) -> Vec<Line<'static>> {
    let label = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Date: ", label),
            Span::raw(quote.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Customer: ", label),
            Span::raw(quote.display_customer().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Email: ", label),
            Span::raw(quote.customer_email.clone()),
        ]),
        Line::from(vec![
            Span::styled("Items: ", label),
            Span::raw(quote.item_count().to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled("─".repeat(40), Style::default().fg(Color::DarkGray))),
    ];

    for line in &quote.line_items {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", line.sku), Style::default().fg(Color::Yellow)),
            Span::raw(format!("{} ", line.description)),
            Span::styled(
                format!(
                    "{} x {} = {}",
                    line.quantity,
                    format_money(currency, line.unit_price),
                    format_money(currency, line.line_total())
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Total: ", label),
        Span::styled(
            format_money(currency, quote.total),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::CatalogItem;
    use crate::model::quote::WorkingQuote;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;
    use rust_decimal::Decimal;

    #[test]
    fn test_navigation_resets_detail_scroll() {
        let mut dialog = HistoryDialog::default();
        dialog.update(Action::PageDown).unwrap();
        dialog.update(Action::ModalDown).unwrap();
        assert_eq!(dialog.selected_index, 1);
        assert_eq!(dialog.detail_scroll, 0);

        dialog.update(Action::ModalUp).unwrap();
        dialog.update(Action::ModalUp).unwrap();
        assert_eq!(dialog.selected_index, 0);
    }

    #[test]
    fn test_enter_confirms() {
        let mut dialog = HistoryDialog::default();
        let action = dialog
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(action, Some(Action::ConfirmModal));
    }

    #[test]
    fn test_detail_lists_each_line() {
        let mut working = WorkingQuote::new();
        working.add_item(&CatalogItem::new("123456", "Product A", Decimal::from(10)));
        working.add_item(&CatalogItem::new("234567", "Product B", Decimal::from(20)));
        let quote = Quote::snapshot(&working, Utc::now());

        let lines = render_quote_detail(&quote, "$");
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.to_string()).collect())
            .collect();

        assert!(text.iter().any(|l| l.contains("Product B") && l.contains("$20.00")));
        assert!(text.iter().any(|l| l == "Total: $30.00"));
        assert!(text.iter().any(|l| l == "Customer: (no customer)"));
    }
}
