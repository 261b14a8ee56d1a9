//! Sentence segmentation for speech-bubble rendering.

/// Characters that end a sentence-like fragment.
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// One sentence-like slice of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub is_first: bool,
    pub is_last: bool,
}

impl Fragment {
    /// Text as drawn inside a bubble
    pub fn display_text(&self) -> &str {
        self.text.trim()
    }
}

fn is_terminator(c: char) -> bool {
    TERMINATORS.contains(&c)
}

/// Split `text` into fragments, each keeping its trailing run of
/// terminators. Joining the fragment texts gives back `text` exactly.
pub fn segment(text: &str) -> Vec<Fragment> {
    let mut pieces: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut prev_terminal = false;

    for (i, c) in text.char_indices() {
        let terminal = is_terminator(c);
        // a fragment closes where a terminator run meets ordinary text
        if prev_terminal && !terminal {
            pieces.push(&text[start..i]);
            start = i;
        }
        prev_terminal = terminal;
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }

    let count = pieces.len();
    pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| Fragment {
            text: piece.to_string(),
            is_first: i == 0,
            is_last: i + 1 == count,
        })
        .collect()
}
