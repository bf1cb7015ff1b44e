//! # NumPad Console (Demo)
//!
//! A line-driven harness for the keypad entry core. Each typed character is
//! one key press: digits, `.` or the locale separator, `<` for backspace and
//! `c` for clear. It is NOT a calculator.

pub mod config;
pub mod interactive;
pub mod session;

pub use config::{ConsoleError, ConsoleResult, KindName, SessionConfig};
pub use session::PadSession;

/// Runs a key script against a fresh session
///
/// Returns the final status line.
pub fn run_script(config: &SessionConfig, script: &str) -> ConsoleResult<String> {
    let mut session = PadSession::from_config(config)?;
    let rejected = session.type_line(script)?;
    if rejected > 0 {
        log::info!("{} key(s) rejected", rejected);
    }
    Ok(session.status_line())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_script() {
        let config = SessionConfig {
            kind: KindName::Integer,
            upper_bound: Some("500".into()),
            ..SessionConfig::default()
        };
        assert_eq!(run_script(&config, "4999").unwrap(), "[i64] 499  = 499");
    }

    #[test]
    fn test_run_script_penny() {
        let status = run_script(&SessionConfig::default(), ".01").unwrap();
        assert_eq!(status, "[f64] 0.01  = 0.01  (2/2 fraction digits)");
    }
}
