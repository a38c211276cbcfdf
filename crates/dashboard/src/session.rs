//! Interactive prompt loop behind the `dashboard` binary.
//!
//! The sidebar asks for a page, the page asks for its inputs and trigger, and
//! the resulting blocks are printed. End of input or `q` ends the session.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use colored::Colorize;
use tracing::debug;

use crate::pages::{Page, RecommendationForm, SegmentationForm};
use crate::render::print_blocks;
use crate::router::{Dashboard, Interaction};

/// Matches listed by a `?term` product search
const SEARCH_LIMIT: usize = 20;

pub struct Session<R, W> {
    dashboard: Dashboard,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(dashboard: Dashboard, input: R, output: W) -> Self {
        Self {
            dashboard,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_sidebar()?;
            let Some(choice) = self.read_line("Select Page")? else {
                break;
            };
            if choice.eq_ignore_ascii_case("q") || choice.eq_ignore_ascii_case("quit") {
                break;
            }

            let Some(page) = Page::from_choice(&choice) else {
                writeln!(self.output, "{} Unknown page '{}'", "✗".red(), choice)?;
                continue;
            };
            debug!("Selected page: {}", page);

            let Some(interaction) = self.collect(page)? else {
                break;
            };
            let blocks = self.dashboard.handle(&interaction);
            print_blocks(&mut self.output, &blocks)?;
        }
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    fn print_sidebar(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "Select Page".bold())?;
        for (position, page) in Page::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {}", position + 1, page)?;
        }
        writeln!(self.output, "  q) Quit")
    }

    /// Gather a page's inputs. `None` means input ended mid-page.
    fn collect(&mut self, page: Page) -> io::Result<Option<Interaction>> {
        match page {
            Page::Home => Ok(Some(Interaction::Home)),
            Page::CustomerSegmentation => self.collect_segmentation(),
            Page::ProductRecommendation => self.collect_recommendation(),
        }
    }

    fn collect_segmentation(&mut self) -> io::Result<Option<Interaction>> {
        let defaults = SegmentationForm::default();
        let Some(recency) =
            self.read_number("Recency (days since last purchase)", defaults.recency)?
        else {
            return Ok(None);
        };
        let Some(frequency) =
            self.read_number("Frequency (number of purchases)", defaults.frequency)?
        else {
            return Ok(None);
        };
        let Some(monetary) = self.read_number("Monetary (total spend)", defaults.monetary)? else {
            return Ok(None);
        };
        let Some(submitted) = self.read_trigger("Predict Segment")? else {
            return Ok(None);
        };

        Ok(Some(Interaction::Segmentation {
            form: SegmentationForm {
                recency,
                frequency,
                monetary,
            },
            submitted,
        }))
    }

    fn collect_recommendation(&mut self) -> io::Result<Option<Interaction>> {
        let defaults = RecommendationForm::default();
        let product = if self.dashboard.products().is_empty() {
            None
        } else {
            match self.read_product()? {
                Some(product) => Some(product),
                None => return Ok(None),
            }
        };
        let Some(top_n) = self.read_number("Number of Recommendations", defaults.top_n)? else {
            return Ok(None);
        };
        let Some(submitted) = self.read_trigger("Generate Recommendations")? else {
            return Ok(None);
        };

        Ok(Some(Interaction::Recommendation {
            form: RecommendationForm { product, top_n },
            submitted,
        }))
    }

    /// Ask for a product by exact name or list position; `?term` searches
    fn read_product(&mut self) -> io::Result<Option<String>> {
        let products = self.dashboard.products();
        let Some(first) = products.first().cloned() else {
            return Ok(None);
        };
        let count = products.len();

        loop {
            let prompt = format!("Select a Product [{} products, ?term to search]", count);
            let Some(answer) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(first));
            }

            if let Some(term) = answer.strip_prefix('?') {
                self.print_matches(term.trim())?;
                continue;
            }

            match self.resolve_product(&answer) {
                Some(product) => return Ok(Some(product)),
                None => writeln!(self.output, "{} No product matches '{}'", "✗".red(), answer)?,
            }
        }
    }

    fn resolve_product(&self, answer: &str) -> Option<String> {
        let products = self.dashboard.products();
        if let Ok(position) = answer.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|idx| products.get(idx))
                .cloned();
        }
        products
            .iter()
            .find(|product| product.as_str() == answer)
            .or_else(|| {
                products
                    .iter()
                    .find(|product| product.eq_ignore_ascii_case(answer))
            })
            .cloned()
    }

    fn print_matches(&mut self, term: &str) -> io::Result<()> {
        let term = term.to_lowercase();
        let matches: Vec<(usize, String)> = self
            .dashboard
            .products()
            .iter()
            .enumerate()
            .filter(|(_, product)| product.to_lowercase().contains(&term))
            .map(|(idx, product)| (idx + 1, product.clone()))
            .collect();

        if matches.is_empty() {
            return writeln!(self.output, "{} No products contain '{}'", "!".yellow(), term);
        }
        for (position, product) in matches.iter().take(SEARCH_LIMIT) {
            writeln!(self.output, "  {}. {}", position.to_string().green(), product)?;
        }
        if matches.len() > SEARCH_LIMIT {
            writeln!(self.output, "  ... {} more", matches.len() - SEARCH_LIMIT)?;
        }
        Ok(())
    }

    /// Ask for a number; empty keeps the default, bad input asks again
    fn read_number<T>(&mut self, label: &str, default: T) -> io::Result<Option<T>>
    where
        T: FromStr + Display + Copy,
    {
        loop {
            let prompt = format!("{} [{}]", label, default);
            let Some(answer) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(default));
            }
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    writeln!(self.output, "{} '{}' is not a valid number", "✗".red(), answer)?
                }
            }
        }
    }

    /// Ask whether to press the page's button; empty means yes
    fn read_trigger(&mut self, button: &str) -> io::Result<Option<bool>> {
        let prompt = format!("{}? [Y/n]", button);
        Ok(self
            .read_line(&prompt)?
            .map(|answer| !answer.eq_ignore_ascii_case("n") && !answer.eq_ignore_ascii_case("no")))
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} {}: ", "›".cyan(), prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
