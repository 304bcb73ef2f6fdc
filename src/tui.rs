use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::Frame;

use crate::error::Result;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const AMOUNT_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));

pub const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

pub const TOTAL_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

/// Format an already-rendered amount as a colored Span.
pub fn amount_span(text: String) -> Span<'static> {
    Span::styled(text, AMOUNT_STYLE)
}

pub enum ViewAction {
    Continue,
    Close,
}

pub trait View {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, key: KeyEvent) -> ViewAction;
    /// Bracketed paste: the whole pasted block arrives at once.
    fn handle_paste(&mut self, _text: &str) {}
}

/// Run an interactive ratatui view. Sets up the terminal, event loop,
/// bracketed paste and panic hook, then restores the terminal on exit.
pub fn run_view(view: &mut dyn View) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();
    // Not every terminal supports it; keystroke-by-keystroke pasting still works.
    let _ = crossterm::execute!(std::io::stdout(), EnableBracketedPaste);

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| view.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                match view.handle_key(key) {
                    ViewAction::Close => break Ok(()),
                    ViewAction::Continue => {}
                }
            }
            Ok(Event::Paste(text)) => view.handle_paste(&text),
            _ => {}
        }
    };

    let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
    drop(terminal);
    ratatui::restore();
    result
}
