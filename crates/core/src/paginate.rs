//! Word-count pagination for the story reader.
//!
//! Content is split on the single space character only. Repeated spaces
//! produce empty tokens and newlines stay inside tokens; page counts depend on
//! exactly this splitting, so it must not be "improved" into proper word
//! segmentation.

/// Number of words on a full page.
pub const WORDS_PER_PAGE: usize = 300;

/// Number of words in `content`, counted the way pages are cut.
///
/// Empty content has zero words.
#[must_use]
pub fn word_count(content: &str) -> usize {
    if content.is_empty() {
        0
    } else {
        content.split(' ').count()
    }
}

/// Number of pages needed for `words` words.
#[must_use]
pub const fn page_count(words: usize) -> usize {
    words.div_ceil(WORDS_PER_PAGE)
}

/// Split content into pages of at most [`WORDS_PER_PAGE`] words.
///
/// Each page is its words re-joined with a single space. The last page holds
/// the remainder.
#[must_use]
pub fn paginate(content: &str) -> Vec<String> {
    if content.is_empty() {
        return Vec::new();
    }

    let words: Vec<&str> = content.split(' ').collect();
    words
        .chunks(WORDS_PER_PAGE)
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Sequential reading position within one story.
///
/// Pages are 1-based. Navigation past either end is a no-op. A new `Reader`
/// always starts at page 1, which is how the position resets when a
/// different story is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reader {
    pages: Vec<String>,
    current_page: usize,
}

impl Reader {
    /// Start reading `content` from the first page.
    #[must_use]
    pub fn new(content: &str) -> Self {
        Self {
            pages: paginate(content),
            current_page: 1,
        }
    }

    /// Jump to `page`, clamped into the valid range.
    #[must_use]
    pub fn at(mut self, page: usize) -> Self {
        self.current_page = page.clamp(1, self.pages.len().max(1));
        self
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether the story produced no pages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    /// The terminal "end of story" state. Never true for an empty story.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        !self.pages.is_empty() && self.current_page == self.pages.len()
    }

    /// Text of the current page, `None` for an empty story.
    #[must_use]
    pub fn current_text(&self) -> Option<&str> {
        self.pages
            .get(self.current_page.saturating_sub(1))
            .map(String::as_str)
    }

    /// Paragraphs of the current page, split on blank lines.
    #[must_use]
    pub fn paragraphs(&self) -> Vec<&str> {
        self.current_text()
            .map(|text| text.split("\n\n").collect())
            .unwrap_or_default()
    }

    /// Page number `previous` would move to, if any.
    #[must_use]
    pub const fn previous_page(&self) -> Option<usize> {
        if self.current_page > 1 {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    /// Page number `next` would move to, if any.
    #[must_use]
    pub fn next_page(&self) -> Option<usize> {
        (self.current_page < self.pages.len()).then_some(self.current_page + 1)
    }

    pub fn previous(&mut self) {
        if let Some(page) = self.previous_page() {
            self.current_page = page;
        }
    }

    pub fn next(&mut self) {
        if let Some(page) = self.next_page() {
            self.current_page = page;
        }
    }

    /// Back to page 1 from the end-of-story view.
    pub const fn read_again(&mut self) {
        self.current_page = 1;
    }
}
