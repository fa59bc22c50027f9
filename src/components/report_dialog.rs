//! Report dialog component
//!
//! Quote totals per calendar day (UTC) and the grand total.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::money::format_money;
use crate::model::report::DateTotal;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState},
    Frame,
};
use rust_decimal::Decimal;

#[derive(Default)]
pub struct ReportDialog {
    pub scroll_offset: usize,
}

impl Component for ReportDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('r') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // See draw_with_report
        Ok(())
    }
}

impl ReportDialog {
    pub fn draw_with_report(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        groups: &[DateTotal],
        grand_total: Decimal,
        currency: &str,
    ) -> Result<()> {
        let height = (groups.len() as u16).saturating_add(6).max(8).min(area.height);
        let popup_area = centered_popup(area, 52, height);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Totals by Date ")
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .title_bottom(
                Line::from(Span::styled(
                    format!(" Grand total: {} ", format_money(currency, grand_total)),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Right),
            );

        if groups.is_empty() {
            let paragraph = Paragraph::new("\nNo saved quotes yet.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, popup_area);
            return Ok(());
        }

        self.scroll_offset = self.scroll_offset.min(groups.len() - 1);

        let rows: Vec<Row> = groups
            .iter()
            .map(|group| {
                Row::new(vec![
                    group.date.format("%Y-%m-%d").to_string(),
                    format!("{:>6}", group.count),
                    format!("{:>14}", format_money(currency, group.total)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Min(14),
            ],
        )
        .header(
            Row::new(["Date", "Quotes", "         Total"]).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

        let mut state = TableState::default().with_selected(Some(self.scroll_offset));
        frame.render_stateful_widget(table, popup_area, &mut state);
        Ok(())
    }
}
