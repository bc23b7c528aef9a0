use clap::Parser;
use color_eyre::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::PathBuf;

use arena_shooter::app::App;
use arena_shooter::audio::AudioManager;
use arena_shooter::config::{CONFIG_ENV_VAR, GameConfig};

#[derive(Parser, Debug)]
#[command(name = "arena-shooter", version)]
#[command(about = "Terminal arena shooter: hold the centre against enemies from every edge")]
struct Cli {
    /// TOML file overriding the default tuning
    #[arg(env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref())?;
    init_logging(&config.display.log_file)?;
    match &cli.config {
        Some(path) => info!("loaded configuration from {}", path.display()),
        None => info!("using default configuration"),
    }

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!(
        "keyboard enhancement supported: {}",
        supports_keyboard_enhancement
    );

    // Open audio before taking over the screen so device warnings land in the log only
    let audio_manager = AudioManager::new(&config.audio);

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;

    let result = App::new(
        &config,
        size.width,
        size.height,
        supports_keyboard_enhancement,
        audio_manager,
    )
    .run(&mut terminal);

    // Cleanup
    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

/// Sends log output to a file; the terminal belongs to the game.
fn init_logging(path: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
