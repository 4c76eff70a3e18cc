//! Input and output actions: read the selected text, copy the link.

use std::io::{IsTerminal, Read};

use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

/// Where the selected text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Arguments,
    Clipboard,
    Stdin,
}

/// Reads the text to extract an event from.
///
/// Positional arguments win; otherwise the clipboard is read when
/// `from_clipboard` is set, and stdin when it is piped.
pub fn read_selection(args: &[String], from_clipboard: bool) -> ClientResult<String> {
    let (source, raw) = if !args.is_empty() {
        (SelectionSource::Arguments, args.join(" "))
    } else if from_clipboard {
        (SelectionSource::Clipboard, read_clipboard()?)
    } else if !std::io::stdin().is_terminal() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        (SelectionSource::Stdin, buffer)
    } else {
        return Err(ClientError::Input(
            "no text given; pass it as arguments, pipe it on stdin, or use --clipboard".into(),
        ));
    };

    let text = clean_selection(&raw)?;
    debug!(source = ?source, len = text.len(), "read selection");
    Ok(text)
}

/// Trims the selection and rejects it if nothing is left.
pub fn clean_selection(raw: &str) -> ClientResult<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ClientError::Input("selected text is empty".into()));
    }
    Ok(text.to_string())
}

fn read_clipboard() -> ClientResult<String> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| ClientError::Action(format!("failed to access clipboard: {}", e)))?;

    clipboard
        .get_text()
        .map_err(|e| ClientError::Action(format!("failed to read clipboard: {}", e)))
}

/// Copies the calendar link to the clipboard.
pub fn copy_to_clipboard(url: &str) -> ClientResult<()> {
    info!("copying calendar link to clipboard");

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| ClientError::Action(format!("failed to access clipboard: {}", e)))?;

    clipboard
        .set_text(url)
        .map_err(|e| ClientError::Action(format!("failed to copy to clipboard: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_are_joined() {
        let args = vec![
            "Lunch".to_string(),
            "with".to_string(),
            "Sam".to_string(),
            "tomorrow".to_string(),
        ];
        assert_eq!(
            read_selection(&args, false).unwrap(),
            "Lunch with Sam tomorrow"
        );
    }

    #[test]
    fn arguments_win_over_clipboard() {
        let args = vec!["Standup at 9".to_string()];
        assert_eq!(read_selection(&args, true).unwrap(), "Standup at 9");
    }

    #[test]
    fn selection_is_trimmed() {
        assert_eq!(
            clean_selection("  Dentist Friday 3pm \n").unwrap(),
            "Dentist Friday 3pm"
        );
    }

    #[test]
    fn blank_selection_is_rejected() {
        let err = clean_selection(" \n\t ").unwrap_err();
        assert!(matches!(err, ClientError::Input(_)));

        let args = vec!["   ".to_string()];
        assert!(read_selection(&args, false).is_err());
    }
}
