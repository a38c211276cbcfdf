//! Terminal rendering of page blocks.

use crate::blocks::Block;
use colored::Colorize;
use std::io::{self, Write};

/// Write blocks top to bottom, one or more lines each
pub fn print_blocks<W: Write>(out: &mut W, blocks: &[Block]) -> io::Result<()> {
    for block in blocks {
        render_block(out, block)?;
    }
    out.flush()
}

fn render_block<W: Write>(out: &mut W, block: &Block) -> io::Result<()> {
    match block {
        Block::Title(text) => {
            writeln!(out)?;
            writeln!(out, "{}", text.bold().blue())?;
            writeln!(out, "{}", "=".repeat(text.chars().count()).blue())
        }
        Block::Subheader(text) => writeln!(out, "{}", text.bold()),
        Block::Markdown(text) => writeln!(out, "{}", emphasize(text)),
        Block::Text(text) => writeln!(out, "  {}", text),
        Block::Input { label, value } => writeln!(out, "{} {}: {}", "•".cyan(), label, value),
        Block::Selection {
            label,
            selected,
            options,
        } => writeln!(
            out,
            "{} {}: {} ({} options)",
            "•".cyan(),
            label,
            selected,
            options
        ),
        Block::Success(text) => writeln!(out, "{} {}", "✓".green(), text.green()),
        Block::Warning(text) => writeln!(out, "{} {}", "!".yellow(), text.yellow()),
        Block::Error(text) => writeln!(out, "{} {}", "✗".red(), text.red()),
    }
}

/// Replace `**bold**` spans with bold terminal text.
///
/// An unmatched `**` is kept as-is.
fn emphasize(text: &str) -> String {
    let mut rendered = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(len) = after.find("**") else {
            break;
        };
        rendered.push_str(&rest[..start]);
        rendered.push_str(&after[..len].bold().to_string());
        rest = &after[len + 2..];
    }
    rendered.push_str(rest);
    rendered
}
