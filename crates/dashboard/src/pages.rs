//! Pages and their input forms.

use std::fmt;

/// Smallest number of similar products a user may ask for
pub const MIN_TOP_N: usize = 3;
/// Largest number of similar products a user may ask for
pub const MAX_TOP_N: usize = 15;
/// Number of similar products shown unless the user changes it
pub const DEFAULT_TOP_N: usize = 5;

/// Sidebar choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    CustomerSegmentation,
    ProductRecommendation,
}

impl Page {
    /// Sidebar order
    pub const ALL: [Page; 3] = [
        Page::Home,
        Page::CustomerSegmentation,
        Page::ProductRecommendation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::CustomerSegmentation => "Customer Segmentation",
            Page::ProductRecommendation => "Product Recommendation",
        }
    }

    /// Parse a sidebar choice: its 1-based position or its label (case-insensitive)
    pub fn from_choice(choice: &str) -> Option<Page> {
        let choice = choice.trim();
        if let Ok(position) = choice.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|idx| Page::ALL.get(idx))
                .copied();
        }
        Page::ALL
            .into_iter()
            .find(|page| page.label().eq_ignore_ascii_case(choice))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs of the Customer Segmentation page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationForm {
    pub recency: f64,
    pub frequency: u32,
    pub monetary: f64,
}

impl Default for SegmentationForm {
    fn default() -> Self {
        Self {
            recency: 325.0,
            frequency: 1,
            monetary: 765322.0,
        }
    }
}

/// Inputs of the Product Recommendation page
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationForm {
    /// Selected product; `None` selects the first product in the list
    pub product: Option<String>,
    pub top_n: usize,
}

impl Default for RecommendationForm {
    fn default() -> Self {
        Self {
            product: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl RecommendationForm {
    pub fn top_n_in_range(&self) -> bool {
        (MIN_TOP_N..=MAX_TOP_N).contains(&self.top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_choice() {
        assert_eq!(Page::from_choice("1"), Some(Page::Home));
        assert_eq!(Page::from_choice(" 3 "), Some(Page::ProductRecommendation));
        assert_eq!(
            Page::from_choice("customer segmentation"),
            Some(Page::CustomerSegmentation)
        );
        assert_eq!(Page::from_choice("0"), None);
        assert_eq!(Page::from_choice("4"), None);
        assert_eq!(Page::from_choice("settings"), None);
    }

    #[test]
    fn test_top_n_bounds() {
        let mut form = RecommendationForm::default();
        assert_eq!(form.top_n, 5);
        assert!(form.top_n_in_range());

        form.top_n = 2;
        assert!(!form.top_n_in_range());
        form.top_n = 15;
        assert!(form.top_n_in_range());
        form.top_n = 16;
        assert!(!form.top_n_in_range());
    }
}
