mod terminal_render;

use anyhow::{Context, Result};
use chatmark_config::Config;
use chatmark_engine::{RenderedMessage, Sender, Theme, render::html, render_message};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::{
    env,
    io::{self, Read, Stdout, stdout},
    process,
};

const USAGE: &str = "Usage: chatmark-cli [--user|--ai] [--html] <file|->";

#[derive(Debug, PartialEq)]
struct Args {
    sender: Option<Sender>,
    html: bool,
    input: String,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut sender = None;
    let mut html = false;
    let mut input = None;

    for arg in args {
        match arg.as_str() {
            "--user" => sender = Some(Sender::User),
            "--ai" => sender = Some(Sender::Ai),
            "--html" => html = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            path if input.is_none() => input = Some(path.to_string()),
            extra => return Err(format!("unexpected argument '{extra}'")),
        }
    }

    let input = input.ok_or_else(|| "no input file given".to_string())?;
    Ok(Args {
        sender,
        html,
        input,
    })
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read message from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read message file '{input}'"))
}

struct App {
    message: RenderedMessage,
    lines: Vec<Line<'static>>,
    scroll: u16,
}

impl App {
    fn new(message: RenderedMessage, theme: &Theme) -> Self {
        let lines = terminal_render::message_lines(&message, theme);
        Self {
            message,
            lines,
            scroll: 0,
        }
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn scroll_down(&mut self, by: u16) {
        self.scroll = self.scroll.saturating_add(by).min(self.max_scroll());
    }

    fn scroll_up(&mut self, by: u16) {
        self.scroll = self.scroll.saturating_sub(by);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    let sender = args.sender.unwrap_or(config.default_sender);
    let text = read_input(&args.input)?;
    let message = render_message(&text, sender);
    log::info!(
        "rendered {} blocks from {} bytes as {sender:?}",
        message.blocks.len(),
        text.len()
    );

    if args.html {
        println!("{}", html::to_html(&message, &config.theme));
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(message, &config.theme);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_down(10),
                KeyCode::PageUp => app.scroll_up(10),
                KeyCode::Home => app.scroll = 0,
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let title = match app.message.sender {
        Sender::User => "You",
        Sender::Ai => "Omi",
    };
    let content = if app.lines.is_empty() {
        Paragraph::new(vec![Line::from("(empty message)")])
    } else {
        Paragraph::new(app.lines.clone())
    };
    let content = content
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(content, chunks[0]);

    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Scroll | "),
        Span::raw("PgUp/PgDn: Page | "),
        Span::raw("Home: Top"),
    ]);
    f.render_widget(Paragraph::new(help), chunks[1]);
}
