//! Single-line text prompt
//!
//! Shared by the import path, quantity and customer field prompts. The text
//! itself lives in the top modal; this component only maps keys and draws.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// What a prompt shows around its input
pub struct Prompt<'a> {
    pub title: &'a str,
    pub label: &'a str,
    pub value: &'a str,
    pub hint: Option<&'a str>,
}

#[derive(Default)]
pub struct InputDialog;

impl Component for InputDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // See draw_prompt
        Ok(())
    }
}

impl InputDialog {
    pub fn draw_prompt(&self, frame: &mut Frame, area: Rect, prompt: &Prompt) -> Result<()> {
        let width = (area.width.saturating_sub(4)).min(70);
        let popup_area = centered_popup(area, width, 9);
        frame.render_widget(Clear, popup_area);

        // Keep the cursor end of long input visible
        let room = (width as usize).saturating_sub(6);
        let chars: Vec<char> = prompt.value.chars().collect();
        let visible: String = chars[chars.len().saturating_sub(room)..].iter().collect();

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                prompt.label.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("> {}_", visible),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                prompt.hint.unwrap_or("").to_string(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("OK  "),
                Span::styled(
                    " Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .title(format!(" {} ", prompt.title))
                    .title_style(
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
