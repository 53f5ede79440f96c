//! Grammar for the contact form: `from:<name> "<message>" > <recipient>`.
//!
//! This is the only place the shell recognizes quotes or `>`; everything
//! else is plain whitespace tokenization.

use folio_types::error::{FolioError, Result};

const SENDER_PREFIX: &str = "from:";

/// A parsed contact request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoRequest<'a> {
    pub sender: &'a str,
    pub message: &'a str,
    pub recipient: &'a str,
}

/// Parse the text after `echo`.
///
/// The sender has no whitespace, the message is everything between the
/// first and last double quote before the final `>`, and the recipient is a
/// single token. Anything else is [`FolioError::MalformedEchoGrammar`].
pub fn parse(raw_args: &str) -> Result<EchoRequest<'_>> {
    let malformed = || FolioError::MalformedEchoGrammar;

    let rest = raw_args.trim().strip_prefix(SENDER_PREFIX).ok_or_else(malformed)?;
    let (sender, rest) = rest.split_once(char::is_whitespace).ok_or_else(malformed)?;
    if sender.is_empty() {
        return Err(malformed());
    }

    let (quoted, recipient) = rest.rsplit_once('>').ok_or_else(malformed)?;
    let recipient = recipient.trim();
    if recipient.is_empty() || recipient.contains(char::is_whitespace) {
        return Err(malformed());
    }

    let message = quoted
        .trim()
        .strip_prefix('"')
        .and_then(|q| q.strip_suffix('"'))
        .ok_or_else(malformed)?;

    Ok(EchoRequest {
        sender,
        message,
        recipient,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_form() {
        let req = parse("from:Alice \"hi there\" > me@example.com").unwrap();
        assert_eq!(req.sender, "Alice");
        assert_eq!(req.message, "hi there");
        assert_eq!(req.recipient, "me@example.com");
    }

    #[test]
    fn preserves_message_whitespace_and_quotes() {
        let req = parse("from:Bob   \"say \"hello\"  twice\"   >   me@example.com").unwrap();
        assert_eq!(req.sender, "Bob");
        assert_eq!(req.message, "say \"hello\"  twice");
    }

    #[test]
    fn gt_inside_message_is_allowed() {
        let req = parse("from:Eve \"a > b\" > me@example.com").unwrap();
        assert_eq!(req.message, "a > b");
    }

    #[test]
    fn no_space_before_redirect() {
        let req = parse("from:Eve \"hey\">me@example.com").unwrap();
        assert_eq!(req.recipient, "me@example.com");
    }

    #[test]
    fn empty_message_is_accepted() {
        assert_eq!(parse("from:Eve \"\" > x@y").unwrap().message, "");
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "",
            "hello",
            "from:Alice",
            "from: \"hi\" > me@example.com",
            "from:Alice hi > me@example.com",
            "from:Alice \"hi > me@example.com",
            "from:Alice \"hi\" me@example.com",
            "from:Alice \"hi\" >",
            "from:Alice \"hi\" > two words",
            "to:Alice \"hi\" > me@example.com",
        ] {
            assert!(
                matches!(parse(bad), Err(FolioError::MalformedEchoGrammar)),
                "should reject {bad:?}"
            );
        }
    }
}
