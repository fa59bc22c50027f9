//! Customers dialog component

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::inset;
use crate::model::customer::Customer;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

/// Imported customers. Enter copies the selected name onto the quote.
#[derive(Default)]
pub struct CustomersDialog {
    pub selected_index: usize,
}

impl Component for CustomersDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ModalDown),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => self.selected_index = self.selected_index.saturating_sub(1),
            Action::ModalDown => self.selected_index = self.selected_index.saturating_add(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

impl CustomersDialog {
    pub fn draw_with_customers(
        &self,
        frame: &mut Frame,
        area: Rect,
        customers: &[Customer],
    ) -> Result<()> {
        frame.render_widget(Clear, area);
        let overlay_area = inset(area, 2);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" Customers ({}) ", customers.len()))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .title_bottom(
                Line::from(" Enter use name  Esc close ").alignment(Alignment::Right),
            );

        if customers.is_empty() {
            let paragraph = Paragraph::new("\nNo customers loaded. Press U to import a customers CSV.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, overlay_area);
            return Ok(());
        }

        let rows: Vec<Row> = customers
            .iter()
            .map(|c| {
                Row::new(vec![
                    c.name.clone(),
                    c.phone.clone(),
                    c.status.clone(),
                    c.sales_rep.clone(),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Percentage(20),
                Constraint::Percentage(15),
                Constraint::Percentage(30),
            ],
        )
        .header(
            Row::new(["Name", "Phone", "Status", "Sales Rep"]).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

        let selected = self.selected_index.min(customers.len() - 1);
        let mut state = TableState::default().with_selected(Some(selected));
        frame.render_stateful_widget(table, overlay_area, &mut state);
        Ok(())
    }
}
