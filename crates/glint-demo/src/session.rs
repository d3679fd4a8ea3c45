#![forbid(unsafe_code)]

//! Terminal session guard for the demo.
//!
//! [`Session::enter`] switches to raw mode and the alternate screen and hides
//! the cursor. Everything is undone, in reverse order, when the guard is
//! dropped. Release builds abort on panic, so a panic hook performs the same
//! cleanup before the process dies, and on Unix a signal thread does it for
//! SIGINT and SIGTERM.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::{cursor, execute, terminal};
use tracing::{debug, warn};

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// RAII guard over raw mode, the alternate screen and cursor visibility.
#[derive(Debug)]
pub struct Session {
    raw_mode: bool,
    alternate_screen: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl Session {
    /// Take over the terminal.
    ///
    /// On error, whatever was already enabled is restored by the partially
    /// built guard's `Drop`.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        let mut session = Self {
            raw_mode: false,
            alternate_screen: false,
            #[cfg(unix)]
            signal_guard: None,
        };

        #[cfg(unix)]
        {
            session.signal_guard = Some(SignalGuard::new()?);
        }

        terminal::enable_raw_mode()?;
        session.raw_mode = true;

        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen)?;
        session.alternate_screen = true;
        execute!(stdout, cursor::Hide, terminal::Clear(terminal::ClearType::All))?;

        debug!("terminal session entered");
        Ok(session)
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
            self.raw_mode = false;
        }
        let _ = stdout.flush();
        debug!("terminal session restored");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                warn!(signal, "termination signal received, restoring terminal");
                best_effort_cleanup();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
