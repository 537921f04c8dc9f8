/// Successive prefixes of a heading for the typewriter effect.
///
/// The first frame is the empty string (the cleared heading), then one more
/// character per frame until the full text is shown.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Byte offset of the end of the next frame; `None` once exhausted.
    next_end: Option<usize>,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_end: Some(0),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Iterator for Typewriter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let end = self.next_end?;
        let frame = self.text[..end].to_string();
        self.next_end = self.text[end..]
            .chars()
            .next()
            .map(|c| end + c.len_utf8());
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_for_hello() {
        let frames: Vec<_> = Typewriter::new("Hello").collect();
        assert_eq!(frames, vec!["", "H", "He", "Hel", "Hell", "Hello"]);
    }

    #[test]
    fn test_stops_permanently() {
        let mut typer = Typewriter::new("Hi");
        assert_eq!(typer.by_ref().count(), 3);
        assert_eq!(typer.next(), None);
        assert_eq!(typer.next(), None);
    }

    #[test]
    fn test_empty_text_yields_only_cleared_frame() {
        let frames: Vec<_> = Typewriter::new("").collect();
        assert_eq!(frames, vec![""]);
    }

    #[test]
    fn test_multibyte_characters_are_not_split() {
        let frames: Vec<_> = Typewriter::new("Olá ✓").collect();
        assert_eq!(frames[3], "Olá");
        assert_eq!(frames.last().map(String::as_str), Some("Olá ✓"));
        assert_eq!(frames.len(), 6);
    }
}
