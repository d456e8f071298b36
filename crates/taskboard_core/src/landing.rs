//! Landing page state: quote carousel and scroll-reveal tracking.

use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

/// Interval between automatic carousel advances.
pub const QUOTE_ROTATION_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub translation: Option<&'static str>,
    pub source: &'static str,
    pub author: &'static str,
}

pub const QUOTES: &[Quote] = &[
    Quote {
        text: "Productivity is never an accident. It is always the result of a commitment to excellence, intelligent planning, and focused effort.",
        translation: None,
        source: "Paul J. Meyer",
        author: "Productivity Expert",
    },
    Quote {
        text: "The key is in not spending time, but in investing it.",
        translation: None,
        source: "Stephen R. Covey",
        author: "Author & Speaker",
    },
    Quote {
        text: "Success is where preparation and opportunity meet.",
        translation: None,
        source: "Bobby Unser",
        author: "Racing Legend",
    },
    Quote {
        text: "You may delay, but time will not.",
        translation: None,
        source: "Benjamin Franklin",
        author: "American Polymath",
    },
    Quote {
        text: "The way to get started is to quit talking and begin doing.",
        translation: None,
        source: "Walt Disney",
        author: "Entrepreneur",
    },
    Quote {
        text: "Don't watch the clock; do what it does. Keep going.",
        translation: None,
        source: "Sam Levenson",
        author: "Comedian & Author",
    },
];

/// Cycles through a non-empty quote list.
#[derive(Debug, Clone)]
pub struct QuoteCarousel {
    quotes: &'static [Quote],
    index: usize,
}

impl Default for QuoteCarousel {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteCarousel {
    pub fn new() -> Self {
        Self {
            quotes: QUOTES,
            index: 0,
        }
    }

    /// Returns `None` for an empty list.
    pub fn with_quotes(quotes: &'static [Quote]) -> Option<Self> {
        (!quotes.is_empty()).then_some(Self { quotes, index: 0 })
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Quote> {
        self.quotes.get(self.index)
    }

    /// Moves to the next quote, wrapping to the first.
    pub fn advance(&mut self) -> Option<&Quote> {
        self.index = (self.index + 1) % self.quotes.len().max(1);
        self.current()
    }

    /// Jumps to `index`; out-of-range values leave the carousel unchanged.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.quotes.len() {
            return false;
        }
        self.index = index;
        true
    }
}

/// Sections that have scrolled into view at least once.
#[derive(Debug, Clone, Default)]
pub struct RevealSet {
    revealed: BTreeSet<String>,
}

impl RevealSet {
    /// Returns `true` the first time `section_id` is revealed.
    pub fn reveal(&mut self, section_id: &str) -> bool {
        self.revealed.insert(section_id.to_string())
    }

    pub fn is_revealed(&self, section_id: &str) -> bool {
        self.revealed.contains(section_id)
    }
}

/// Local state of the landing page.
#[derive(Debug, Clone, Default)]
pub struct LandingState {
    pub carousel: QuoteCarousel,
    pub sections: RevealSet,
    pub dark_mode: bool,
    pub features_dropdown_open: bool,
}

impl LandingState {
    /// Called every `QUOTE_ROTATION_INTERVAL`.
    pub fn tick(&mut self) -> Option<&Quote> {
        self.carousel.advance()
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn set_features_dropdown(&mut self, open: bool) {
        self.features_dropdown_open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::{LandingState, QuoteCarousel, RevealSet, QUOTES};

    #[test]
    fn advance_wraps_to_first_quote() {
        let mut carousel = QuoteCarousel::new();
        for _ in 0..QUOTES.len() - 1 {
            carousel.advance();
        }
        assert_eq!(carousel.index(), QUOTES.len() - 1);
        assert_eq!(carousel.advance().map(|q| q.source), Some("Paul J. Meyer"));
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let mut carousel = QuoteCarousel::new();
        assert!(carousel.go_to(2));
        assert!(!carousel.go_to(QUOTES.len()));
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn empty_quote_list_has_no_carousel() {
        assert!(QuoteCarousel::with_quotes(&[]).is_none());
    }

    #[test]
    fn reveal_is_sticky() {
        let mut sections = RevealSet::default();
        assert!(sections.reveal("quotes"));
        assert!(!sections.reveal("quotes"));
        assert!(sections.is_revealed("quotes"));
        assert!(!sections.is_revealed("features"));
    }

    #[test]
    fn landing_state_ticks_and_toggles() {
        let mut landing = LandingState::default();
        assert_eq!(landing.tick().map(|q| q.source), Some("Stephen R. Covey"));
        assert!(landing.toggle_theme());
        assert!(!landing.toggle_theme());
        landing.set_features_dropdown(true);
        assert!(landing.features_dropdown_open);
    }
}
