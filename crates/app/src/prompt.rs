//! Interactive input: delete confirmation and masked password entry.

use std::io::{BufRead, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};

use crate::error::{AppError, Result};

const PASSWORD_ATTEMPTS: usize = 3;

/// Ask `question` and read a yes/no answer from stdin. Anything but `y`/`yes`
/// means no.
pub fn confirm(question: &str) -> Result<bool> {
    let mut out = std::io::stderr();
    write!(out, "{question} [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Read a password, echoing `*` for each character.
pub fn password(prompt: &str) -> Result<String> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err(AppError::Prompt("interrupted".to_string()));
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

/// Read a new password and its confirmation, retrying on mismatch.
pub fn new_password() -> Result<String> {
    let mut out = std::io::stderr();
    for _ in 0..PASSWORD_ATTEMPTS {
        let first = password("Password: ")?;
        if first.is_empty() {
            notice(&mut out, "Password must not be empty.")?;
            continue;
        }

        let second = password("Confirm password: ")?;
        if first == second {
            return Ok(first);
        }
        notice(&mut out, "Passwords do not match. Try again.")?;
    }

    Err(AppError::Prompt("too many attempts".to_string()))
}

fn notice(out: &mut std::io::Stderr, message: &str) -> Result<()> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(message),
        Print("\r\n")
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
