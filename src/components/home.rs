//! Home component - Main application screen
//!
//! Catalog list on the left, the working quote on the right. Owns focus,
//! selection and the catalog search query.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use crate::error::ImportKind;
use crate::model::catalog::{Catalog, CatalogItem};
use crate::model::money::format_money;
use crate::model::quote::{LineItem, WorkingQuote};
use crate::model::ui::{CustomerField, Focus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Home component for the main application view
pub struct HomeComponent {
    /// Pane receiving navigation keys
    pub focus: Focus,

    /// Selection in the (filtered) catalog list
    pub catalog_state: ListState,

    /// Selection in the quote table
    pub quote_state: TableState,

    /// Search query string
    pub search_query: String,

    /// Whether search mode is active
    pub search_mode: bool,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            focus: Focus::Catalog,
            catalog_state: ListState::default().with_selected(Some(0)),
            quote_state: TableState::default(),
            search_query: String::new(),
            search_mode: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Catalog item under the cursor, after search filtering
    pub fn selected_catalog_item<'a>(&self, catalog: &'a Catalog) -> Option<&'a CatalogItem> {
        let index = self.catalog_state.selected()?;
        catalog.search(&self.search_query).nth(index)
    }

    /// Quote line under the cursor
    pub fn selected_line<'a>(&self, quote: &'a WorkingQuote) -> Option<&'a LineItem> {
        quote.lines().get(self.quote_state.selected()?)
    }

    fn focused_len(&self, catalog: &Catalog, quote: &WorkingQuote) -> usize {
        match self.focus {
            Focus::Catalog => catalog.search(&self.search_query).count(),
            Focus::Quote => quote.lines().len(),
        }
    }

    fn focused_selected(&self) -> Option<usize> {
        match self.focus {
            Focus::Catalog => self.catalog_state.selected(),
            Focus::Quote => self.quote_state.selected(),
        }
    }

    fn select_focused(&mut self, index: Option<usize>) {
        match self.focus {
            Focus::Catalog => self.catalog_state.select(index),
            Focus::Quote => self.quote_state.select(index),
        }
    }

    /// Select next item in the focused list, wrapping to the top
    pub fn next(&mut self, catalog: &Catalog, quote: &WorkingQuote) {
        let len = self.focused_len(catalog, quote);
        if len == 0 {
            self.select_focused(None);
            return;
        }
        let next = match self.focused_selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.select_focused(Some(next));
    }

    /// Select previous item in the focused list, wrapping to the bottom
    pub fn previous(&mut self, catalog: &Catalog, quote: &WorkingQuote) {
        let len = self.focused_len(catalog, quote);
        if len == 0 {
            self.select_focused(None);
            return;
        }
        let prev = match self.focused_selected() {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.select_focused(Some(prev));
    }

    pub fn select_first(&mut self, catalog: &Catalog, quote: &WorkingQuote) {
        let len = self.focused_len(catalog, quote);
        self.select_focused(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, catalog: &Catalog, quote: &WorkingQuote) {
        let len = self.focused_len(catalog, quote);
        self.select_focused(len.checked_sub(1));
    }

    pub fn switch_focus(&mut self, catalog: &Catalog, quote: &WorkingQuote) {
        self.focus = self.focus.toggle();
        self.clamp_selection(catalog, quote);
    }

    /// Keep both selections inside their lists after the data changed
    pub fn clamp_selection(&mut self, catalog: &Catalog, quote: &WorkingQuote) {
        let catalog_len = catalog.search(&self.search_query).count();
        self.catalog_state
            .select(clamp_index(self.catalog_state.selected(), catalog_len));
        self.quote_state
            .select(clamp_index(self.quote_state.selected(), quote.lines().len()));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    /// Search always filters the catalog, so it takes focus
    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
        self.focus = Focus::Catalog;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn search_input(&mut self, c: char, catalog: &Catalog) {
        self.search_query.push(c);
        self.reset_catalog_selection(catalog);
    }

    pub fn search_backspace(&mut self, catalog: &Catalog) {
        self.search_query.pop();
        self.reset_catalog_selection(catalog);
    }

    fn reset_catalog_selection(&mut self, catalog: &Catalog) {
        let has_match = catalog.search(&self.search_query).next().is_some();
        self.catalog_state.select(has_match.then_some(0));
    }
}

fn clamp_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(selected.unwrap_or(0).min(len - 1))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchFocus),

            // Search
            KeyCode::Char('/') => Some(Action::EnterSearchMode),

            // Working quote
            KeyCode::Enter => match self.focus {
                Focus::Catalog => Some(Action::AddSelectedItem),
                Focus::Quote => Some(Action::EditSelectedQuantity),
            },
            KeyCode::Char('a') => Some(Action::AddSelectedItem),
            KeyCode::Char('e') => Some(Action::EditSelectedQuantity),
            KeyCode::Char('n') => Some(Action::EditCustomer(CustomerField::Name)),
            KeyCode::Char('m') => Some(Action::EditCustomer(CustomerField::Email)),
            KeyCode::Char('x') => Some(Action::DiscardQuote),

            // Import / export
            KeyCode::Char('u') => Some(Action::OpenImport(ImportKind::Items)),
            KeyCode::Char('U') => Some(Action::OpenImport(ImportKind::Customers)),
            KeyCode::Char('p') => Some(Action::ExportPdf),
            KeyCode::Char('E') => Some(Action::EmailQuote),

            // Modals
            KeyCode::Char('c') => Some(Action::OpenCustomers),
            KeyCode::Char('h') => Some(Action::OpenHistory),
            KeyCode::Char('r') => Some(Action::OpenReport),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub catalog: &'a Catalog,
    pub quote: &'a WorkingQuote,
    pub currency: &'a str,
    pub history_len: usize,
    pub customers_len: usize,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    render_catalog(frame, layout.catalog, home, ctx);
    render_customer(frame, layout.customer, ctx.quote);
    render_quote(frame, layout.quote, home, ctx);
    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, home);

    Ok(())
}

fn pane_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_catalog(frame: &mut Frame, area: Rect, home: &mut HomeComponent, ctx: &HomeRenderContext) {
    let matches = ctx.catalog.search(&home.search_query);
    let shown = matches.clone().count();

    // Borders, highlight symbol, sku and price columns
    let description_width = (area.width as usize).saturating_sub(2 + 2 + 10 + 12);

    let items: Vec<ListItem> = matches
        .map(|item| {
            ListItem::new(Line::from(vec![
                Span::styled(fit_width(&item.sku, 9), Style::default().fg(Color::Yellow)),
                Span::raw(" "),
                Span::styled(
                    fit_width(&item.description, description_width),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>12}", format_money(ctx.currency, item.unit_price)),
                    Style::default().fg(Color::Green),
                ),
            ]))
        })
        .collect();

    let title = if home.search_query.is_empty() {
        format!(" Catalog ({}) ", ctx.catalog.len())
    } else {
        format!(" Catalog ({}/{}) [/{}] ", shown, ctx.catalog.len(), home.search_query)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(pane_border(home.focus == Focus::Catalog)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut home.catalog_state);
}

fn render_customer(frame: &mut Frame, area: Rect, quote: &WorkingQuote) {
    let field = |label: &str, key: &str, value: &str| {
        let value_span = if value.is_empty() {
            Span::styled("(not set)", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(value.to_string(), Style::default().fg(Color::White))
        };
        Line::from(vec![
            Span::styled(
                format!(" {key} "),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{label:<7}"), Style::default().fg(Color::Gray)),
            value_span,
        ])
    };

    let paragraph = Paragraph::new(vec![
        field("Name", "n", &quote.customer_name),
        field("Email", "m", &quote.customer_email),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Customer ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(paragraph, area);
}

fn render_quote(frame: &mut Frame, area: Rect, home: &mut HomeComponent, ctx: &HomeRenderContext) {
    let header = Row::new(["SKU", "Description", "Qty", "Unit Price", "Total"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = ctx
        .quote
        .lines()
        .iter()
        .map(|line| {
            Row::new(vec![
                Cell::from(line.sku.clone()),
                Cell::from(line.description.clone()),
                Cell::from(format!("{:>5}", line.quantity)),
                Cell::from(format!("{:>12}", format_money(ctx.currency, line.unit_price))),
                Cell::from(format!("{:>12}", format_money(ctx.currency, line.line_total())))
                    .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(12),
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    let total = Line::from(Span::styled(
        format!(" Total: {} ", format_money(ctx.currency, ctx.quote.total())),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Quote ({} lines) ", ctx.quote.lines().len()))
                .title_bottom(total)
                .border_style(pane_border(home.focus == Focus::Quote)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, &mut home.quote_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let line = if let Some(error) = ctx.error {
        Line::from(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(status) = ctx.status_message {
        Line::from(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                " Quote Ledger ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    " {} saved quotes  {} customers",
                    ctx.history_len, ctx.customers_len
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn key_span(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let help_spans = if home.search_mode {
        vec![
            key_span("Esc/Enter", Color::Yellow),
            Span::raw("Done  "),
            Span::styled(
                format!("Search: {}_", home.search_query),
                Style::default().fg(Color::Cyan),
            ),
        ]
    } else {
        let enter_hint = match home.focus {
            Focus::Catalog => "Add ",
            Focus::Quote => "Qty ",
        };
        vec![
            key_span("q", Color::Yellow),
            Span::raw("Quit "),
            key_span("Tab", Color::Cyan),
            Span::raw("Pane "),
            key_span("Enter", Color::Green),
            Span::raw(enter_hint),
            key_span("/", Color::Cyan),
            Span::raw("Search "),
            key_span("p", Color::Green),
            Span::raw("PDF "),
            key_span("E", Color::Green),
            Span::raw("Email "),
            key_span("h", Color::Magenta),
            Span::raw("History "),
            key_span("r", Color::Magenta),
            Span::raw("Report "),
            key_span("u/U", Color::Blue),
            Span::raw("Import "),
            key_span("?", Color::White),
            Span::raw("Help"),
        ]
    };

    let paragraph = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Pad or truncate `text` to exactly `width` terminal columns
pub fn fit_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if text.width() <= width {
        let mut padded = text.to_string();
        padded.push_str(&" ".repeat(width - text.width()));
        return padded;
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::seed();
        let mut items = catalog.items().to_vec();
        items.push(CatalogItem::new("345678", "Widget", Decimal::from(5)));
        catalog.replace(items);
        catalog
    }

    #[test]
    fn test_enter_depends_on_focus() {
        let mut home = HomeComponent::new();
        assert_eq!(
            home.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::AddSelectedItem)
        );

        home.focus = Focus::Quote;
        assert_eq!(
            home.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::EditSelectedQuantity)
        );
    }

    #[test]
    fn test_key_mapping() {
        let mut home = HomeComponent::new();
        let cases = [
            (KeyCode::Char('/'), Action::EnterSearchMode),
            (KeyCode::Char('n'), Action::EditCustomer(CustomerField::Name)),
            (KeyCode::Char('m'), Action::EditCustomer(CustomerField::Email)),
            (KeyCode::Char('u'), Action::OpenImport(ImportKind::Items)),
            (KeyCode::Char('U'), Action::OpenImport(ImportKind::Customers)),
            (KeyCode::Char('p'), Action::ExportPdf),
            (KeyCode::Char('E'), Action::EmailQuote),
            (KeyCode::Char('c'), Action::OpenCustomers),
            (KeyCode::Char('h'), Action::OpenHistory),
            (KeyCode::Char('r'), Action::OpenReport),
            (KeyCode::Char('x'), Action::DiscardQuote),
            (KeyCode::Char('q'), Action::OpenQuitDialog),
            (KeyCode::Tab, Action::SwitchFocus),
        ];
        for (code, expected) in cases {
            assert_eq!(home.handle_key_event(key(code)).unwrap(), Some(expected));
        }

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(home.handle_key_event(ctrl_c).unwrap(), Some(Action::ForceQuit));
    }

    #[test]
    fn test_navigation_wraps() {
        let catalog = catalog();
        let quote = WorkingQuote::new();
        let mut home = HomeComponent::new();

        home.previous(&catalog, &quote);
        assert_eq!(home.catalog_state.selected(), Some(2));
        home.next(&catalog, &quote);
        assert_eq!(home.catalog_state.selected(), Some(0));
        home.select_last(&catalog, &quote);
        assert_eq!(home.selected_catalog_item(&catalog).unwrap().sku, "345678");
    }

    #[test]
    fn test_search_filters_selection() {
        let catalog = catalog();
        let mut home = HomeComponent::new();
        home.enter_search_mode();
        for c in "widg".chars() {
            home.search_input(c, &catalog);
        }

        assert_eq!(home.selected_catalog_item(&catalog).unwrap().sku, "345678");

        home.search_input('z', &catalog);
        assert!(home.selected_catalog_item(&catalog).is_none());

        home.search_backspace(&catalog);
        assert!(home.selected_catalog_item(&catalog).is_some());
    }

    #[test]
    fn test_quote_focus_selects_lines() {
        let catalog = catalog();
        let mut quote = WorkingQuote::new();
        let mut home = HomeComponent::new();

        home.switch_focus(&catalog, &quote);
        assert!(home.selected_line(&quote).is_none());

        quote.add_item(&catalog.items()[0]);
        quote.add_item(&catalog.items()[1]);
        home.clamp_selection(&catalog, &quote);
        assert_eq!(home.selected_line(&quote).unwrap().sku, "123456");

        home.next(&catalog, &quote);
        assert_eq!(home.selected_line(&quote).unwrap().sku, "234567");

        quote.reset();
        home.clamp_selection(&catalog, &quote);
        assert!(home.quote_state.selected().is_none());
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("abc", 5), "abc  ");
        assert_eq!(fit_width("abcdef", 4), "abc…");
        assert_eq!(fit_width("漢字漢字", 5), "漢字…");
        assert_eq!(fit_width("漢字漢字", 5).width(), 5);
        assert_eq!(fit_width("anything", 0), "");
    }
}
