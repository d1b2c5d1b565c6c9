//! Interactive demo wiring every padboard widget into a tab-switchable app.

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use padboard::{
    translate, CheckList, Entry, FocusRing, MenuOutcome, OnScreenKeyboard, Selector,
    SelectorConfig, SelectorMode, SettingsMenu, Theme,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::Line,
    widgets::Paragraph,
    Terminal,
};
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

#[derive(ClapParser)]
#[command(name = "padboard-demo")]
#[command(about = "Interactive demo of the padboard widgets", long_about = None)]
struct Cli {
    /// Theme file path (TOML). Defaults are used when the file is absent.
    #[arg(short, long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Event poll timeout in milliseconds
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Keyboard,
    Checklist,
    Selector,
    Settings,
    Buttons,
}

impl Screen {
    fn next(self) -> Self {
        match self {
            Screen::Keyboard => Screen::Checklist,
            Screen::Checklist => Screen::Selector,
            Screen::Selector => Screen::Settings,
            Screen::Settings => Screen::Buttons,
            Screen::Buttons => Screen::Keyboard,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Screen::Keyboard => "Keyboard",
            Screen::Checklist => "Checklist",
            Screen::Selector => "Selector",
            Screen::Settings => "Settings",
            Screen::Buttons => "Buttons",
        }
    }
}

struct DemoApp {
    screen: Screen,
    keyboard: OnScreenKeyboard,
    checklist: CheckList,
    selector: Selector,
    settings: SettingsMenu,
    buttons: FocusRing,
    button_focus: usize,
    status: Rc<RefCell<String>>,
}

impl DemoApp {
    fn new() -> Self {
        let status = Rc::new(RefCell::new(String::from(
            "Tab switches widgets, Ctrl+Q quits",
        )));

        let submit_status = Rc::clone(&status);
        let cancel_status = Rc::clone(&status);
        let keyboard = OnScreenKeyboard::new("")
            .on_submit(move |text| *submit_status.borrow_mut() = format!("submitted: {text}"))
            .on_cancel(move || *cancel_status.borrow_mut() = "keyboard cancelled".to_string());

        let change_status = Rc::clone(&status);
        let sync_status = Rc::clone(&status);
        let checklist = CheckList::from_labels(
            &["Arcade", "Console", "Computer", "Handheld"],
            &["Console".to_string()],
        )
        .on_change(move |values| *change_status.borrow_mut() = format!("checked: {values:?}"))
        .on_selection_sync(move |count| {
            let mut status = sync_status.borrow_mut();
            *status = format!("{status} ({count} selected)");
        });

        let single_status = Rc::clone(&status);
        let selector = Selector::new(SelectorConfig {
            mode: SelectorMode::Single,
            include_all: true,
            entries: vec![
                Entry::new("Nintendo Entertainment System", "nes"),
                Entry::new("Super Nintendo", "snes"),
                Entry::new("Sega Genesis", "genesis"),
            ],
            initially_selected: vec![],
        })
        .on_single(move |value| {
            *single_status.borrow_mut() = if value.is_empty() {
                "system filter: all".to_string()
            } else {
                format!("system filter: {value}")
            }
        });

        let toggle_status = Rc::clone(&status);
        let cycle_status = Rc::clone(&status);
        let action_status = Rc::clone(&status);
        let settings = SettingsMenu::new("main", 0)
            .add_toggle("Sound", "Play audio feedback", true, move |on| {
                *toggle_status.borrow_mut() = format!("sound: {on}")
            })
            .add_cycle(
                "Exit delay",
                "Seconds before relaunch",
                vec!["0".into(), "1".into(), "2".into(), "5".into()],
                0,
                move |option, _| *cycle_status.borrow_mut() = format!("exit delay: {option}s"),
            )
            .add_action("Export log", "Write the service log to disk", move || {
                *action_status.borrow_mut() = "log exported".to_string()
            });

        let escape_status = Rc::clone(&status);
        let buttons = FocusRing::new(vec![
            "Search".to_string(),
            "Clear".to_string(),
            "Back".to_string(),
        ])
        .on_escape(move || *escape_status.borrow_mut() = "button bar escape".to_string());

        Self {
            screen: Screen::Keyboard,
            keyboard,
            checklist,
            selector,
            settings,
            buttons,
            button_focus: 0,
            status,
        }
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        let Some(input) = translate(&key) else {
            return;
        };
        match self.screen {
            Screen::Keyboard => {
                self.keyboard.handle_input(input);
            }
            Screen::Checklist => {
                self.checklist.handle_input(input);
            }
            Screen::Selector => {
                self.selector.handle_input(input);
            }
            Screen::Settings => {
                if let MenuOutcome::SwitchTo(page) = self.settings.handle_input(input) {
                    *self.status.borrow_mut() = format!("go back to: {page}");
                }
            }
            Screen::Buttons => {
                if let Some(next) = self.buttons.handle_input(input, self.button_focus) {
                    self.button_focus = next;
                } else if input == padboard::InputKey::Activate {
                    let label = self.buttons.targets()[self.button_focus].clone();
                    *self.status.borrow_mut() = format!("pressed: {label}");
                }
            }
        }
    }
}

fn run(theme: &Theme, tick: Duration) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
    terminal.hide_cursor()?;

    let result = event_loop(&mut terminal, theme, tick);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    theme: &Theme,
    tick: Duration,
) -> Result<()> {
    let mut app = DemoApp::new();

    loop {
        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(8),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .split(frame.area());

            let title = Line::styled(
                format!(" padboard demo - {} ", app.screen.title()),
                theme.label_style(),
            );
            frame.render_widget(Paragraph::new(title), chunks[0]);

            let buf = frame.buffer_mut();
            match app.screen {
                Screen::Keyboard => app.keyboard.render(chunks[1], buf, theme),
                Screen::Checklist => app.checklist.render(chunks[1], buf, theme),
                Screen::Selector => app.selector.render(chunks[1], buf, theme),
                Screen::Settings => app.settings.render(chunks[1], buf, theme),
                Screen::Buttons => {}
            }
            app.buttons.render(chunks[2], buf, theme, app.button_focus);

            let status = Line::styled(app.status.borrow().clone(), theme.description_style());
            frame.render_widget(Paragraph::new(status), chunks[3]);
        })?;

        if !event::poll(tick)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Tab => {
                    app.screen = app.screen.next();
                    tracing::debug!(screen = app.screen.title(), "switched demo screen");
                }
                _ => app.handle_key(key),
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let theme = match cli.theme.as_deref() {
        Some(path) => Theme::load(path)?,
        None => Theme::default(),
    };

    run(&theme, Duration::from_millis(cli.tick_ms))
}
