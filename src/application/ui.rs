use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::SourceRequest;
use crate::domain::services::EventsService;
use crate::domain::services::GenerationPanel;
use crate::domain::services::GenerationState;

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut GenerationState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut scroll: u16 = 0;

    tx.send(Action::GenerationStart(state.request.clone()))?;

    loop {
        let panel = GenerationPanel::new(state);
        let case_lines = panel.case_lines();

        terminal.draw(|frame| {
            let outer = Block::default().borders(Borders::ALL).title(panel.title());
            let inner = outer.inner(frame.size());
            frame.render_widget(outer, frame.size());

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Max(3),
                    Constraint::Min(1),
                    Constraint::Max(1),
                ])
                .split(inner);

            frame.render_widget(Paragraph::new(panel.status_lines()), layout[0]);
            frame.render_widget(
                Paragraph::new(case_lines.clone()).scroll((scroll, 0)),
                layout[1],
            );
            frame.render_widget(Paragraph::new(panel.footer_line()), layout[2]);
        })?;

        match events.next().await? {
            Event::KeyboardCTRLC() => {
                tx.send(Action::GenerationAbort())?;
                break;
            }
            Event::KeyboardEsc() => {
                if state.generating {
                    tx.send(Action::GenerationAbort())?;
                    state.cancel();
                } else {
                    break;
                }
            }
            Event::KeyboardChar('q') => {
                // Closing is deferred until the run settles so a half written
                // folder is never left behind unnoticed.
                if !state.generating {
                    break;
                }
            }
            Event::KeyboardChar('r') => {
                if !state.generating {
                    tx.send(Action::GenerationStart(state.request.clone()))?;
                }
            }
            Event::KeyboardChar('d') => {
                state.dismiss_notices();
            }
            Event::KeyboardChar(_) => (),
            Event::UIScrollUp() => {
                scroll = scroll.saturating_sub(1);
            }
            Event::UIScrollDown() => {
                if usize::from(scroll) + 1 < case_lines.len() {
                    scroll += 1;
                }
            }
            Event::UITick() => (),
            event => {
                state.handle_event(&event);
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    request: SourceRequest,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut state = GenerationState::new(request);
    start_loop(&mut terminal, &mut state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
