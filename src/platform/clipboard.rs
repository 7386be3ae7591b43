// System clipboard access shared by every backend, through arboard.

use arboard::{Clipboard, Error};

/// Read the clipboard as text. `None` means no clipboard could be reached.
pub fn read_text(debug: bool) -> Option<String> {
    let result = Clipboard::new().and_then(|mut clipboard| clipboard.get_text());
    if let Err(e) = &result {
        diag!(debug, "[Clipboard] get_text failed: {}", e);
    }
    text_or_absent(result)
}

/// Map an arboard read to the absent / empty / text distinction.
///
/// A clipboard that exists but holds nothing readable as text is empty. Every other
/// failure, including a clipboard that cannot be opened at all, is absent.
pub fn text_or_absent(result: Result<String, Error>) -> Option<String> {
    match result {
        Ok(text) => Some(text),
        Err(Error::ContentNotAvailable) => Some(String::new()),
        Err(_) => None,
    }
}
