use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use typemeter::app::App;
use typemeter::config::{Config, ConfigStore, FileConfigStore};
use typemeter::corpus::WORD_COUNT_OPTIONS;
use typemeter::runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker};

/// minimal typing speed test tui with live accuracy and light/dark themes
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words to use in the test (10, 25, 50, 100 or 200)
    #[clap(short = 'w', long, value_parser = parse_word_count)]
    number_of_words: Option<usize>,

    /// start in dark mode
    #[clap(long)]
    dark: bool,

    /// start in light mode
    #[clap(long, conflicts_with = "dark")]
    light: bool,
}

fn parse_word_count(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if WORD_COUNT_OPTIONS.contains(&n) {
        Ok(n)
    } else {
        Err(format!(
            "word count must be one of {WORD_COUNT_OPTIONS:?}"
        ))
    }
}

impl Cli {
    /// Layer CLI overrides on top of the stored preferences.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(n) = self.number_of_words {
            config.number_of_words = n;
        }
        if self.dark {
            config.dark_mode = true;
        }
        if self.light {
            config.dark_mode = false;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    let mut app = App::from_config(&config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let res = run_loop(&mut terminal, &mut app, &mut runner, &store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_loop<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
    store: &impl ConfigStore,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => {
                // Only an active session owns the clock; ticks raised
                // before a reset land on the fresh idle session as no-ops.
                if app.session.is_active() {
                    app.on_tick();
                }
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.toggle_theme();
                    let _ = store.save(&app.to_config());
                }
                KeyCode::Tab => {
                    app.new_test();
                }
                KeyCode::Up => {
                    if app.cycle_word_count(1) {
                        let _ = store.save(&app.to_config());
                    }
                }
                KeyCode::Down => {
                    if app.cycle_word_count(-1) {
                        let _ = store.save(&app.to_config());
                    }
                }
                KeyCode::Backspace => app.backspace(),
                // Control chords that reach this far are unbound, not input.
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if app.session.has_finished() {
                        if c == 'n' {
                            app.new_test();
                        }
                    } else {
                        let was_idle = app.session.is_idle();
                        app.write(c);
                        if was_idle && app.session.is_active() {
                            // The first keystroke starts the timer; count
                            // its first second from here, not from launch.
                            runner.restart_tick();
                        }
                    }
                }
                _ => {}
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["typemeter"]);

        assert_eq!(cli.number_of_words, None);
        assert!(!cli.dark);
        assert!(!cli.light);
    }

    #[test]
    fn test_cli_accepts_every_word_count_option() {
        for n in WORD_COUNT_OPTIONS {
            let arg = n.to_string();
            let cli = Cli::parse_from(["typemeter", "-w", arg.as_str()]);
            assert_eq!(cli.number_of_words, Some(n));
        }

        let cli = Cli::parse_from(["typemeter", "--number-of-words", "100"]);
        assert_eq!(cli.number_of_words, Some(100));
    }

    #[test]
    fn test_cli_rejects_word_count_outside_options() {
        assert!(Cli::try_parse_from(["typemeter", "-w", "42"]).is_err());
        assert!(Cli::try_parse_from(["typemeter", "-w", "ten"]).is_err());
    }

    #[test]
    fn test_cli_dark_and_light_conflict() {
        assert!(Cli::try_parse_from(["typemeter", "--dark", "--light"]).is_err());
        assert!(Cli::try_parse_from(["typemeter", "--dark"]).is_ok());
        assert!(Cli::try_parse_from(["typemeter", "--light"]).is_ok());
    }

    #[test]
    fn test_cli_overrides_layer_onto_config() {
        let stored = Config {
            number_of_words: 25,
            dark_mode: true,
        };

        let cli = Cli::parse_from(["typemeter"]);
        assert_eq!(cli.apply(stored.clone()), stored);

        let cli = Cli::parse_from(["typemeter", "-w", "200", "--light"]);
        let applied = cli.apply(stored);
        assert_eq!(applied.number_of_words, 200);
        assert!(!applied.dark_mode);
    }

    #[test]
    fn test_parse_word_count() {
        assert_eq!(parse_word_count("50"), Ok(50));
        assert!(parse_word_count("51").is_err());
        assert!(parse_word_count("fifty").is_err());
    }
}
