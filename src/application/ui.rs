use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Navigation;
use crate::domain::models::Phase;
use crate::domain::models::ScreenConfig;
use crate::domain::models::Stepper;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Submission;

const SIDEBAR_WIDTH: u16 = 26;
const BOTTOM_PANEL_HEIGHT: u16 = 4;
const GENERATE_HINT: &str = "✅ Press Enter or type /generate to build your proposal";

fn notice_panel<B: Backend>(frame: &mut Frame<B>, rect: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(text.to_string())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double),
            )
            .alignment(Alignment::Center),
        rect,
    );
}

fn render_bottom_panel<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    app_state: &AppState,
    textarea: &mut tui_textarea::TextArea<'static>,
) {
    let workflow = &app_state.workflow;
    if workflow.pending().is_some() && !matches!(workflow.phase(), Phase::Working) {
        Loading::default().render(frame, rect);
        return;
    }

    match workflow.phase() {
        Phase::Discovery => {
            textarea.set_block(TextArea::prompt_block("Ask Xceed AI…"));
            frame.render_widget(textarea.widget(), rect);
        }
        Phase::Confirmed => {
            textarea.set_block(TextArea::prompt_block(GENERATE_HINT));
            frame.render_widget(textarea.widget(), rect);
        }
        Phase::Working => {
            if let Some(agent_thinking) = app_state.agent_thinking() {
                agent_thinking.render(frame, rect);
            } else {
                Loading::default().render(frame, rect);
            }
        }
        Phase::ProposalReady => {
            textarea.set_block(TextArea::email_block(workflow.email_error()));
            frame.render_widget(textarea.widget(), rect);
        }
        Phase::AwaitingConfirmation { .. } => {
            notice_panel(
                frame,
                rect,
                "Did you receive the email?   [y] Yes   [n] Not yet",
            );
        }
        Phase::Emailed => {
            notice_panel(frame, rect, "🔄 Press Enter to start a new conversation");
        }
    }
}

fn render<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &mut AppState,
    textarea: &mut tui_textarea::TextArea<'static>,
) {
    let stepper = Stepper::new(app_state.screen.navigation, app_state.workflow.step());

    let main_rect = match app_state.screen.navigation {
        Navigation::StatusBar => {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(stepper.status_bar_height()),
                    Constraint::Min(1),
                ])
                .split(frame.size());
            stepper.render_status_bar(frame, layout[0]);
            layout[1]
        }
        Navigation::Sidebar => {
            let layout = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                .split(frame.size());
            stepper.render_sidebar(frame, layout[0]);
            layout[1]
        }
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(1),
            Constraint::Length(BOTTOM_PANEL_HEIGHT),
        ])
        .split(main_rect);

    if layout[0].width != app_state.last_known_width
        || layout[0].height != app_state.last_known_height
    {
        app_state.set_rect(layout[0]);
    }

    app_state
        .bubble_list
        .render(frame, layout[0], app_state.scroll.position);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        layout[0].inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );

    render_bottom_panel(frame, layout[1], app_state, textarea);
}

fn accepts_typing(app_state: &AppState) -> bool {
    let workflow = &app_state.workflow;
    if workflow.pending().is_some() {
        return false;
    }

    return matches!(
        workflow.phase(),
        Phase::Discovery | Phase::Confirmed | Phase::ProposalReady
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let mut events = EventsService::new(rx);
    let mut last_tick = Instant::now();

    tx.send(app_state.start())?;

    #[cfg(feature = "dev")]
    {
        let test_str = "We are a logistics company with 40 dispatchers looking to replace our spreadsheets.";
        for char in test_str.chars() {
            textarea.input(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            });
        }
    }

    loop {
        terminal.draw(|frame| {
            render(frame, app_state, &mut textarea);
        })?;

        let event = events.next().await?;
        app_state.tick(last_tick.elapsed());
        last_tick = Instant::now();

        match event {
            Event::GatewayReply(epoch, reply) => {
                app_state.handle_gateway_reply(epoch, reply);
                if app_state.take_clear_input() {
                    textarea = TextArea::default();
                }
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                let input_str = textarea.lines().join("\n");
                match app_state.submit(&input_str) {
                    Submission::Quit => {
                        break;
                    }
                    Submission::Rejected => {}
                    Submission::Handled => {
                        textarea = TextArea::default();
                    }
                    Submission::Dispatch(action) => {
                        textarea = TextArea::default();
                        tx.send(action)?;
                    }
                    Submission::DispatchKeepingInput(action) => {
                        tx.send(action)?;
                    }
                }
            }
            Event::KeyboardCharInput(input) => {
                if app_state.answer_key(&input).is_some() {
                    continue;
                }
                if accepts_typing(app_state) {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if accepts_typing(app_state) {
                    for char in text.replace('\r', "").chars() {
                        let key = if char == '\n' {
                            Key::Enter
                        } else {
                            Key::Char(char)
                        };
                        textarea.input(Input {
                            key,
                            ctrl: false,
                            alt: false,
                        });
                    }
                }
            }
            Event::UIResize() | Event::UITick() => {}
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let screen = ScreenConfig::from_config()?;
    tracing::debug!(?screen, "Starting chat screen");
    let mut app_state = AppState::new(screen);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let res = start_loop(&mut terminal, &mut app_state, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
