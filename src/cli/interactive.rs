use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::info;

use super::Overrides;
use crate::error::Result;
use crate::fmt::Currency;
use crate::parser::LineFormat;
use crate::presenter::present;
use crate::tracker::ExpenseTracker;
use crate::tui::{
    amount_span, run_view, View, ViewAction, ERROR_STYLE, FOOTER_STYLE, HEADER_STYLE, TOTAL_STYLE,
};

pub fn run(overrides: &Overrides) -> Result<()> {
    let (format, currency) = overrides.resolve()?;
    info!(%format, %currency, "starting interactive session");
    let mut screen = TrackerScreen::new(format, currency);
    run_view(&mut screen)
}

/// The paste-and-add screen: text area on top, banner, numbered list, total.
pub struct TrackerScreen {
    tracker: ExpenseTracker,
    currency: Currency,
    list_offset: usize,
    last_visible_rows: usize,
    status_message: Option<String>,
}

impl TrackerScreen {
    pub fn new(format: LineFormat, currency: Currency) -> Self {
        Self {
            tracker: ExpenseTracker::new(format),
            currency,
            list_offset: 0,
            last_visible_rows: 10,
            status_message: None,
        }
    }

    fn add(&mut self) {
        match self.tracker.add() {
            Ok(added) => {
                let noun = if added == 1 { "expense" } else { "expenses" };
                self.status_message = Some(format!("Added {added} {noun}"));
                self.scroll_to_end();
            }
            // The tracker keeps the error; the banner reads it from there.
            Err(_) => self.status_message = None,
        }
    }

    fn clear(&mut self) {
        self.tracker.clear();
        self.list_offset = 0;
        self.status_message = Some("Cleared all expenses".to_string());
    }

    fn scroll_to_end(&mut self) {
        let len = self.tracker.store().len();
        self.list_offset = len.saturating_sub(self.last_visible_rows);
    }

    fn page_up(&mut self) {
        self.list_offset = self.list_offset.saturating_sub(self.last_visible_rows.max(1));
    }

    fn page_down(&mut self) {
        let max = self
            .tracker
            .store()
            .len()
            .saturating_sub(self.last_visible_rows);
        self.list_offset = (self.list_offset + self.last_visible_rows.max(1)).min(max);
    }

    fn type_char(&mut self, c: char) {
        self.tracker.input_mut().push(c);
        self.status_message = None;
    }

    fn draw_input(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let input = self.tracker.input();
        let cursor = Span::styled("_", Style::default().fg(Color::Cyan));

        let lines: Vec<Line> = if input.is_empty() {
            vec![Line::from(vec![
                cursor,
                Span::styled(
                    format!(
                        "Enter expenses (e.g., '{}')",
                        self.tracker.format().example()
                    ),
                    FOOTER_STYLE,
                ),
            ])]
        } else {
            let raw: Vec<&str> = input.split('\n').collect();
            let last = raw.len() - 1;
            raw.into_iter()
                .enumerate()
                .map(|(i, text)| {
                    let text = Span::styled(text.to_string(), Style::default().fg(Color::Cyan));
                    if i == last {
                        Line::from(vec![text, cursor.clone()])
                    } else {
                        Line::from(text)
                    }
                })
                .collect()
        };

        // Keep the line being typed in view.
        let inner_height = area.height.saturating_sub(2) as usize;
        let hidden = lines.len().saturating_sub(inner_height);
        let visible: Vec<Line> = lines.into_iter().skip(hidden).collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Expenses ");
        frame.render_widget(Paragraph::new(visible).block(block), area);
    }
}

impl View for TrackerScreen {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let input_lines = self.tracker.input().split('\n').count();
        let input_height = u16::try_from(input_lines)
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .clamp(5, (area.height / 3).max(5));

        let [header_area, sep, input_area, banner_area, list_area, total_area, hints_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(input_height),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(format!(
                " Expense Tracker  \u{00b7}  {}  \u{00b7}  {}",
                self.tracker.format().name(),
                self.currency.symbol()
            ))
            .style(HEADER_STYLE),
            header_area,
        );

        let sep_line = "\u{2501}".repeat(area.width as usize);
        frame.render_widget(Paragraph::new(sep_line.as_str()).style(border_style), sep);

        self.draw_input(frame, input_area);

        if let Some(err) = self.tracker.error() {
            frame.render_widget(
                Paragraph::new(format!(" Error: {err}")).style(ERROR_STYLE),
                banner_area,
            );
        } else if let Some(msg) = &self.status_message {
            frame.render_widget(
                Paragraph::new(format!(" {msg}")).style(Style::default().fg(Color::Green)),
                banner_area,
            );
        }

        // List: one line of column header, the rest for rows.
        let presentation = present(self.tracker.store(), self.currency);
        let data_rows = (list_area.height as usize).saturating_sub(1);
        self.last_visible_rows = data_rows;
        self.list_offset = self
            .list_offset
            .min(presentation.rows.len().saturating_sub(data_rows));

        let mut lines = Vec::new();
        if presentation.rows.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("   No expenses yet.", FOOTER_STYLE)));
        } else {
            let date_header = if presentation.has_dates() { "Date" } else { "" };
            lines.push(Line::from(Span::styled(
                format!("  {:>5} {:>16}  {:<32} {}", "#", "Amount", "Description", date_header),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )));
            let end = (self.list_offset + data_rows).min(presentation.rows.len());
            for row in &presentation.rows[self.list_offset..end] {
                lines.push(Line::from(vec![
                    Span::raw(format!("  {:>5} ", format!("{}.", row.index))),
                    amount_span(format!("{:>16}", row.amount)),
                    Span::raw(format!("  {:<32} ", super::truncate(&row.description, 32))),
                    Span::styled(row.date.clone().unwrap_or_default(), FOOTER_STYLE),
                ]));
            }
        }
        frame.render_widget(Paragraph::new(lines), list_area);

        if !presentation.rows.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::raw(format!(" Total ({} items): ", presentation.rows.len())),
                    amount_span(presentation.total.clone()),
                ]))
                .style(TOTAL_STYLE),
                total_area,
            );
        }

        frame.render_widget(
            Paragraph::new(concat!(
                " Enter=new line  Ctrl+A/F2=add expenses  Ctrl+L/F3=clear all",
                "  PgUp/PgDn=scroll  Esc=quit",
            ))
            .style(FOOTER_STYLE),
            hints_area,
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return ViewAction::Close,
            KeyCode::Char('a') if ctrl => self.add(),
            KeyCode::Char('l') if ctrl => self.clear(),
            KeyCode::F(2) => self.add(),
            KeyCode::F(3) => self.clear(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => self.type_char(c),
            KeyCode::Enter => self.type_char('\n'),
            KeyCode::Backspace => {
                self.tracker.input_mut().pop();
            }
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            _ => {}
        }
        ViewAction::Continue
    }

    fn handle_paste(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.tracker.input_mut().push_str(&normalized);
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use rust_decimal::Decimal;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(screen: &mut TrackerScreen, text: &str) {
        for c in text.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            screen.handle_key(key(code));
        }
    }

    fn render(screen: &mut TrackerScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_typing_and_adding() {
        let mut screen = TrackerScreen::new(LineFormat::Strict, Currency::Rupee);
        type_text(&mut screen, "25,000/- CASH 29/08/2024\n*1,200/- TAXI 01/01/2024*");
        assert_eq!(screen.tracker.input().lines().count(), 2);

        screen.handle_key(ctrl('a'));
        assert_eq!(screen.tracker.store().len(), 2);
        assert!(screen.tracker.input().is_empty());
        assert_eq!(screen.tracker.store().total(), Decimal::from(26200));
        assert_eq!(screen.status_message.as_deref(), Some("Added 2 expenses"));
    }

    #[test]
    fn test_failed_add_shows_banner_and_keeps_text() {
        let mut screen = TrackerScreen::new(LineFormat::Strict, Currency::Rupee);
        type_text(&mut screen, "Groceries 50.00");
        screen.handle_key(key(KeyCode::F(2)));
        assert!(screen.tracker.error().is_some());
        assert_eq!(screen.tracker.input(), "Groceries 50.00");

        let out = render(&mut screen);
        assert!(out.contains("No valid expenses found"));
    }

    #[test]
    fn test_clear_removes_banner_and_list() {
        let mut screen = TrackerScreen::new(LineFormat::Loose, Currency::Dollar);
        type_text(&mut screen, "Coffee 3.50");
        screen.handle_key(ctrl('a'));
        type_text(&mut screen, "nothing");
        screen.handle_key(ctrl('a'));
        assert!(screen.tracker.error().is_some());

        screen.handle_key(ctrl('l'));
        assert!(screen.tracker.store().is_empty());
        assert!(screen.tracker.input().is_empty());
        assert!(screen.tracker.error().is_none());

        let out = render(&mut screen);
        assert!(out.contains("No expenses yet."));
        assert!(!out.contains("Error:"));
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut screen = TrackerScreen::new(LineFormat::Loose, Currency::Dollar);
        screen.handle_paste("Groceries 50.00\r\nRoom 4 rent 1200\r");
        assert_eq!(screen.tracker.input(), "Groceries 50.00\nRoom 4 rent 1200\n");
        screen.handle_key(key(KeyCode::F(2)));
        assert_eq!(screen.tracker.store().len(), 2);
    }

    #[test]
    fn test_render_lists_rows_and_total() {
        let mut screen = TrackerScreen::new(LineFormat::Loose, Currency::Dollar);
        screen.handle_paste("Groceries 50.00\nRoom 4 rent 1200");
        screen.handle_key(ctrl('a'));

        let out = render(&mut screen);
        assert!(out.contains("Groceries"));
        assert!(out.contains("Room 4 rent"));
        assert!(out.contains("$1,250.00"));
        assert!(out.contains("Total (2 items)"));
    }

    #[test]
    fn test_render_very_long_paste_keeps_last_line_visible() {
        let mut screen = TrackerScreen::new(LineFormat::Loose, Currency::Dollar);
        let mut text: String = (0..70_000).map(|i| format!("Item {i} 1\n")).collect();
        text.push_str("Last line 9");
        screen.handle_paste(&text);

        let out = render(&mut screen);
        assert!(out.contains("Last line 9"));
        assert!(!out.contains("Item 0 1"));

        screen.handle_key(ctrl('a'));
        assert_eq!(screen.tracker.store().len(), 70_001);
    }

    #[test]
    fn test_backspace_and_escape() {
        let mut screen = TrackerScreen::new(LineFormat::Loose, Currency::Dollar);
        type_text(&mut screen, "ab");
        screen.handle_key(key(KeyCode::Backspace));
        assert_eq!(screen.tracker.input(), "a");
        assert!(matches!(screen.handle_key(key(KeyCode::Esc)), ViewAction::Close));
    }

    #[test]
    fn test_control_chars_are_not_typed() {
        let mut screen = TrackerScreen::new(LineFormat::Loose, Currency::Dollar);
        screen.handle_key(ctrl('x'));
        assert!(screen.tracker.input().is_empty());
    }
}
