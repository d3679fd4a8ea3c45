#![forbid(unsafe_code)]

//! Demo application: the beams header, a blank spacer row and the ticker
//! line, redrawn every tick.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use glint_fx::{BeamsConfig, BeamsEffect, TypewriterTicker};
use glint_style::Rgb;
use tracing::{debug, info};

use crate::cli::Opts;
use crate::session::Session;

/// Text revealed when no `--text-file` is given.
pub const DEFAULT_BANNER: &str = r"       _ _       _
  __ _| (_)_ __ | |_
 / _` | | | '_ \| __|
| (_| | | | | | | |_
 \__, |_|_|_| |_|\__|
 |___/";

/// Minimum beams canvas height.
pub const MIN_HEADER_HEIGHT: u16 = 7;

/// Columns left free around the ticker text.
const TICKER_MARGIN: usize = 4;

const TICKER_FG: Rgb = Rgb::gray(0x80);

#[inline]
fn term_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Beams canvas height for `text`: one blank row above and below.
#[must_use]
pub fn header_height(text: &str) -> u16 {
    let lines = text.split('\n').count().saturating_add(2);
    u16::try_from(lines)
        .unwrap_or(u16::MAX)
        .max(MIN_HEADER_HEIGHT)
}

/// Read the text to reveal. Trailing newlines are dropped.
pub fn load_text(path: Option<&Path>) -> io::Result<String> {
    let Some(path) = path else {
        return Ok(DEFAULT_BANNER.to_owned());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
    Ok(text.trim_end_matches(['\n', '\r']).to_owned())
}

/// Whether `key` asks to quit.
#[must_use]
pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Both engines plus the screen geometry they are drawn into.
#[derive(Debug)]
pub struct App {
    beams: BeamsEffect,
    ticker: TypewriterTicker,
    width: u16,
}

impl App {
    /// Build the engines for a terminal `width` columns wide.
    #[must_use]
    pub fn new(width: u16, text: &str, opts: &Opts) -> Self {
        let mut config = BeamsConfig::default();
        if let Some(hold) = opts.hold_frames {
            config.hold_frames = hold;
        }
        let beams = BeamsEffect::with_config(width, header_height(text), text, config, opts.seed);
        let ticker = opts
            .seed
            .map_or_else(TypewriterTicker::new, TypewriterTicker::with_seed);
        Self {
            beams,
            ticker,
            width,
        }
    }

    /// The beams effect.
    #[must_use]
    pub fn beams(&self) -> &BeamsEffect {
        &self.beams
    }

    /// Advance both engines by one tick.
    pub fn tick(&mut self) {
        self.beams.update();
        self.ticker.update();
    }

    /// Follow a terminal width change. The header keeps its height.
    pub fn resize(&mut self, width: u16) {
        self.width = width;
        self.beams.resize(width, self.beams.height());
    }

    /// Ticker text padded to the full terminal width.
    #[must_use]
    pub fn ticker_line(&self) -> String {
        let width = usize::from(self.width);
        let inner = width.saturating_sub(TICKER_MARGIN);
        let text = self.ticker.render(inner);
        let left = (width - inner) / 2;
        let right = width - inner - left;
        format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
    }

    /// Queue a full redraw and flush it.
    pub fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let bg = term_color(self.beams.config().background);
        let frame = self.beams.render_frame();
        for (y, row) in (0u16..).zip(frame.ansi_rows()) {
            queue!(out, MoveTo(0, y), Print(row))?;
        }

        let spacer = " ".repeat(usize::from(self.width));
        let ticker = self.ticker_line();
        let header = self.beams.height();
        queue!(
            out,
            MoveTo(0, header),
            Print(spacer.on(bg)),
            MoveTo(0, header.saturating_add(1)),
            Print(ticker.with(term_color(TICKER_FG)).on(bg).italic()),
        )?;
        out.flush()
    }
}

/// Run the demo until quit, auto-exit or an I/O error.
pub fn run(opts: &Opts) -> io::Result<()> {
    let text = load_text(opts.text_file.as_deref())?;
    let session = Session::enter()?;
    let (cols, rows) = session.size()?;
    let mut app = App::new(cols, &text, opts);
    info!(
        cols,
        rows,
        fps = opts.fps,
        seed = ?opts.seed,
        characters = app.beams().characters().len(),
        "demo started"
    );

    let tick = opts.tick_interval();
    let deadline = opts.exit_after().map(|after| Instant::now() + after);
    let mut stdout = io::stdout();
    let mut next_tick = Instant::now() + tick;
    app.draw(&mut stdout)?;

    loop {
        let now = Instant::now();
        if deadline.is_some_and(|d| now >= d) {
            info!("exit deadline reached");
            break;
        }

        if event::poll(next_tick.saturating_duration_since(now))? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) => {
                    debug!(?key.code, "quit requested");
                    break;
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    app.resize(width);
                    execute!(stdout, Clear(ClearType::All))?;
                    app.draw(&mut stdout)?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        if now >= next_tick {
            app.tick();
            app.draw(&mut stdout)?;
            next_tick += tick;
            // Drop ticks missed while the terminal was busy.
            if next_tick < now {
                next_tick = now + tick;
            }
        }
    }

    drop(session);
    info!("demo finished");
    Ok(())
}
