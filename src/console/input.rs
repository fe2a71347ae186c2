//! console::input
//!
//! Where the session gets its lines from.
//!
//! - [`TerminalSource`]: the raw-mode editor, with completion and history
//! - [`PlainSource`]: buffered lines from a pipe, a file or a test
//!
//! [`InputProbe`] is the non-blocking "has the operator typed anything?"
//! check used to cancel the progress watch.

use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Read};
use std::rc::Rc;

use crate::editor::{terminal, EditorError, History, Step};

/// One read from a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// End of input; the session ends normally.
    Closed,
    /// The interrupt key; the session ends with a failure status.
    Interrupted,
}

/// A source of command lines.
pub trait LineSource {
    /// Read one line. `names` are completion candidates.
    fn read_line(&mut self, prompt: &str, names: &[String]) -> Result<Input, EditorError>;
}

/// Interactive terminal input.
#[derive(Debug, Default)]
pub struct TerminalSource {
    history: History,
}

impl TerminalSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineSource for TerminalSource {
    fn read_line(&mut self, prompt: &str, names: &[String]) -> Result<Input, EditorError> {
        match terminal::read_line(prompt, names, &self.history)? {
            Step::Submit(line) => {
                self.history.push(&line);
                Ok(Input::Line(line))
            }
            Step::EndOfInput => Ok(Input::Closed),
            Step::Interrupt => Ok(Input::Interrupted),
            Step::Continue => Ok(Input::Line(String::new())),
        }
    }
}

/// Read buffer for [`SharedReader`]. Larger than std's own stdin buffer, so
/// reads through it bypass that buffer and every unread byte is visible here.
const SHARED_BUFFER: usize = 64 * 1024;

/// One buffered reader shared by a [`PlainSource`] and a [`StdinProbe`].
///
/// The probe has to see lines the source already pulled off the pipe, and
/// neither side may hold the stdin lock across calls.
#[derive(Debug)]
pub struct SharedReader<R> {
    inner: Rc<RefCell<BufReader<R>>>,
}

impl<R> Clone for SharedReader<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R: Read> SharedReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BufReader::with_capacity(SHARED_BUFFER, reader))),
        }
    }

    /// Whether unread bytes are already buffered.
    pub fn has_buffered(&self) -> bool {
        !self.inner.borrow().buffer().is_empty()
    }

    /// The next line without its terminator, or `None` at end of input.
    pub fn next_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.inner.borrow_mut().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Line-buffered input without a terminal. No prompt is shown.
#[derive(Debug)]
pub struct PlainSource<R> {
    reader: SharedReader<R>,
}

impl<R: Read> PlainSource<R> {
    pub fn new(reader: R) -> Self {
        Self::shared(SharedReader::new(reader))
    }

    /// Read from a reader another component also consumes.
    pub fn shared(reader: SharedReader<R>) -> Self {
        Self { reader }
    }
}

impl<R: Read> LineSource for PlainSource<R> {
    fn read_line(&mut self, _prompt: &str, _names: &[String]) -> Result<Input, EditorError> {
        Ok(match self.reader.next_line()? {
            Some(line) => Input::Line(line),
            None => Input::Closed,
        })
    }
}

/// Non-blocking check for operator input.
pub trait InputProbe {
    /// Whether a line (or end of input) is waiting. A waiting line is consumed.
    fn input_pending(&mut self) -> io::Result<bool>;
}

/// Probes the process's standard input.
///
/// Lines are consumed through the same [`SharedReader`] the plain line
/// source uses, so nothing read ahead by one is invisible to the other.
#[derive(Debug)]
pub struct StdinProbe {
    stdin: SharedReader<io::Stdin>,
}

impl StdinProbe {
    pub fn new(stdin: SharedReader<io::Stdin>) -> Self {
        Self { stdin }
    }
}

impl InputProbe for StdinProbe {
    fn input_pending(&mut self) -> io::Result<bool> {
        if !self.stdin.has_buffered() && !stdin_ready()? {
            return Ok(false);
        }
        self.stdin.next_line()?;
        Ok(true)
    }
}

/// Readable or hung up, without blocking.
#[cfg(unix)]
fn stdin_ready() -> io::Result<bool> {
    use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
    use std::os::fd::AsFd;

    let stdin = io::stdin();
    let mut fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
    match poll(&mut fds, PollTimeout::ZERO) {
        Ok(0) => Ok(false),
        Ok(_) => Ok(fds[0]
            .revents()
            .map(|r| r.intersects(PollFlags::POLLIN | PollFlags::POLLHUP))
            .unwrap_or(false)),
        Err(nix::errno::Errno::EINTR) => Ok(false),
        Err(e) => Err(io::Error::from(e)),
    }
}

/// An Enter key press, without blocking.
#[cfg(not(unix))]
fn stdin_ready() -> io::Result<bool> {
    use crossterm::event::{self, Event, KeyCode};
    use std::time::Duration;

    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.code == KeyCode::Enter {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Reports input after a fixed number of empty polls.
#[derive(Debug, Clone)]
pub struct ScriptedProbe {
    remaining: Option<usize>,
}

impl ScriptedProbe {
    /// Input arrives on poll number `polls + 1`.
    pub fn after(polls: usize) -> Self {
        Self {
            remaining: Some(polls),
        }
    }

    /// Input never arrives.
    pub fn never() -> Self {
        Self { remaining: None }
    }
}

impl InputProbe for ScriptedProbe {
    fn input_pending(&mut self) -> io::Result<bool> {
        match self.remaining.as_mut() {
            None => Ok(false),
            Some(0) => Ok(true),
            Some(n) => {
                *n -= 1;
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn plain_source_reads_lines_then_closes() {
        let mut source = PlainSource::new(Cursor::new("getinfo\r\n\nstop"));
        assert_eq!(source.read_line("> ", &[]).unwrap(), Input::Line("getinfo".into()));
        assert_eq!(source.read_line("> ", &[]).unwrap(), Input::Line(String::new()));
        assert_eq!(source.read_line("> ", &[]).unwrap(), Input::Line("stop".into()));
        assert_eq!(source.read_line("> ", &[]).unwrap(), Input::Closed);
    }

    #[test]
    fn scripted_probe() {
        let mut probe = ScriptedProbe::after(2);
        assert!(!probe.input_pending().unwrap());
        assert!(!probe.input_pending().unwrap());
        assert!(probe.input_pending().unwrap());

        let mut probe = ScriptedProbe::never();
        assert!(!probe.input_pending().unwrap());
    }

    #[test]
    fn shared_reader_exposes_read_ahead() {
        let shared = SharedReader::new(Cursor::new("watchprogress\n\nexit\n"));
        let mut source = PlainSource::shared(shared.clone());
        assert!(!shared.has_buffered());

        assert_eq!(
            source.read_line("> ", &[]).unwrap(),
            Input::Line("watchprogress".into())
        );
        // The rest of the input was read ahead along with the first line.
        assert!(shared.has_buffered());
        assert_eq!(shared.next_line().unwrap(), Some(String::new()));

        assert_eq!(source.read_line("> ", &[]).unwrap(), Input::Line("exit".into()));
        assert!(!shared.has_buffered());
        assert_eq!(shared.next_line().unwrap(), None);
    }
}
