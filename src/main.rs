mod app;
mod config;
mod power;
mod theme;
mod ui;
mod web;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use power::{report, Number, Powers};

#[derive(Parser, Debug)]
#[command(name = "powcalc")]
#[command(author = "Sean Fournier")]
#[command(version = "0.1.0")]
#[command(about = "Square, cube and fifth power of a number, in the terminal or the browser")]
struct Args {
    /// Print the results for this value and exit
    #[arg(short, long, allow_hyphen_values = true)]
    value: Option<String>,

    /// With --value, print the results as JSON
    #[arg(short, long, requires = "value")]
    json: bool,

    /// Serve the web form instead of the terminal form
    #[arg(short, long)]
    serve: bool,

    /// Listen address for --serve (overrides the config file)
    #[arg(short, long, requires = "serve")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr keeps stdout clean for --value output)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load();

    // Handle CLI-only commands
    if let Some(value) = args.value {
        return print_powers(&value, args.json);
    }

    if args.serve {
        let bind = args.bind.unwrap_or_else(|| config.bind.clone());
        return web::serve(&bind, web::WebState::from(&config)).await;
    }

    // Run TUI
    run_tui(config)
}

fn print_powers(value: &str, json: bool) -> Result<()> {
    let value: Number = value.parse()?;
    let powers = Powers::compute(value)?;

    if json {
        let response = web::PowersResponse::from(powers);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        for line in report::lines(&powers) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn run_tui(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.remember_value() {
        tracing::warn!("Could not save last value: {}", e);
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Input errors are shown in the results box, never fatal
                            if let Err(e) = app.handle_key(key) {
                                tracing::warn!("Key handling failed: {}", e);
                            }
                        }
                    }
                }
            }
        }

        app.tick();
    }
}
