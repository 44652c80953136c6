//! Confirmation before deleting extra entries.
use std::io::{self, BufRead, Write};

/// Something that can answer a yes/no question.
pub trait Confirm: std::fmt::Debug {
    /// Ask `question`; anything but an explicit affirmative is a refusal.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn confirm(&self, question: &str) -> io::Result<bool>;
}

/// Asks on the terminal (stdout) and reads one line from stdin.
///
/// Keystrokes typed before the question appears, or left over after the
/// answer, are discarded so they can neither answer it nor leak into the
/// shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, question: &str) -> io::Result<bool> {
        ask(
            &mut io::stdin().lock(),
            &mut io::stdout().lock(),
            question,
            discard_pending_input,
        )
    }
}

/// Drop unread terminal input. Not a terminal means nothing to drop.
#[cfg(unix)]
fn discard_pending_input() {
    let _ = rustix::termios::tcflush(io::stdin(), rustix::termios::QueueSelector::IFlush);
}

/// Drop queued console input events.
#[cfg(windows)]
fn discard_pending_input() {
    use crossterm::event;
    use std::time::Duration;

    while matches!(event::poll(Duration::ZERO), Ok(true)) {
        if event::read().is_err() {
            break;
        }
    }
}

#[cfg(not(any(unix, windows)))]
const fn discard_pending_input() {}

/// Answers every question affirmatively (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// Write `question` to `output` and read the answer from `input`.
///
/// `discard_pending` runs before the question is shown and again after the
/// answer is read. End of input counts as a refusal.
///
/// # Errors
///
/// Returns an error if writing the question or reading the answer fails.
pub fn ask(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
    mut discard_pending: impl FnMut(),
) -> io::Result<bool> {
    discard_pending();
    write!(output, "{question} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    let read = input.read_line(&mut answer);
    discard_pending();
    read?;
    Ok(is_affirmative(&answer))
}

/// Whether `answer` is `y` or `yes`, ignoring case and surrounding space.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
