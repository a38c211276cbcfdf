//! Display elements produced by the pages.

/// One element of a rendered page, top to bottom
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Subheader(String),
    /// Text that may contain `**bold**` spans
    Markdown(String),
    Text(String),
    /// An input widget and its current value
    Input { label: String, value: String },
    /// A single-choice selector: the current choice out of `options` choices
    Selection {
        label: String,
        selected: String,
        options: usize,
    },
    Success(String),
    Warning(String),
    Error(String),
}
