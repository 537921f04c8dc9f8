//! WhatsApp click-to-chat links for the contact popup.

pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Placeholder business number (country code, no `+`).
pub const DEFAULT_WHATSAPP_NUMBER: &str = "919876543210";

/// Percent-encodes like JavaScript's `encodeURIComponent`.
///
/// `urlencoding` leaves only `A-Z a-z 0-9 - _ . ~` untouched; browsers also
/// keep `! ' ( ) *` literal in links, so those escapes are undone.
pub fn encode_uri_component(value: &str) -> String {
    let encoded = urlencoding::encode(value);
    if !encoded.contains('%') {
        return encoded.into_owned();
    }
    encoded
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppLink {
    number: String,
    trim_message: bool,
}

impl WhatsAppLink {
    pub fn new(number: impl Into<String>, trim_message: bool) -> Self {
        Self {
            number: number.into(),
            trim_message,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn trims_message(&self) -> bool {
        self.trim_message
    }

    /// Deep link carrying `message` as the prefilled chat text.
    pub fn href(&self, message: &str) -> String {
        let message = if self.trim_message {
            message.trim()
        } else {
            message
        };
        format!(
            "{}/{}?text={}",
            WHATSAPP_BASE_URL,
            self.number,
            encode_uri_component(message)
        )
    }
}

impl Default for WhatsAppLink {
    fn default() -> Self {
        Self::new(DEFAULT_WHATSAPP_NUMBER, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_message_is_percent_encoded() {
        let link = WhatsAppLink::default();
        let href = link.href("Hi there");
        assert_eq!(href, "https://wa.me/919876543210?text=Hi%20there");
        assert!(href.ends_with("text=Hi%20there"));
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(
            WhatsAppLink::new("15550001111", false).href(""),
            "https://wa.me/15550001111?text="
        );
    }

    #[test]
    fn test_trim_option() {
        assert_eq!(
            WhatsAppLink::new("1", true).href("  hello \n"),
            "https://wa.me/1?text=hello"
        );
        assert_eq!(
            WhatsAppLink::new("1", false).href(" hello"),
            "https://wa.me/1?text=%20hello"
        );
    }

    #[test]
    fn test_matches_encode_uri_component() {
        assert_eq!(encode_uri_component("a&b=c?"), "a%26b%3Dc%3F");
        assert_eq!(encode_uri_component("Wow! (it's *great*)"), "Wow!%20(it's%20*great*)");
        assert_eq!(encode_uri_component("100%"), "100%25");
        assert_eq!(encode_uri_component("%21"), "%2521");
        assert_eq!(encode_uri_component("café"), "caf%C3%A9");
    }

    proptest! {
        #[test]
        fn encoded_link_round_trips(message in "\\PC{0,40}") {
            let href = WhatsAppLink::default().href(&message);
            let (_, text) = href.split_once("?text=").unwrap();
            prop_assert!(!text.contains(' '));
            prop_assert!(!text.contains('&'));
            let decoded = urlencoding::decode(text).unwrap();
            prop_assert_eq!(decoded.as_ref(), message.as_str());
        }
    }
}
