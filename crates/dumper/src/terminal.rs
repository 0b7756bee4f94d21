//! Terminal output: markup to ANSI text, and the animation loop.
//!
//! Anchors become OSC 8 hyperlinks, the cursor glyph is shown in reverse
//! video, and entities are decoded back to their characters.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveUp;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use dumper_core::{Entropy, ROW_WIDTH};
use tracing::debug;

use crate::screen::Screen;

const OSC8_CLOSE: &str = "\x1b]8;;\x1b\\";
const REVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

/// Convert row markup to terminal text.
#[must_use]
pub fn markup_to_ansi(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find(['<', '&']) {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        if rest.starts_with('<') {
            let Some(end) = rest.find('>') else {
                out.push_str(rest);
                return out;
            };
            push_tag(&mut out, &rest[..=end]);
            rest = &rest[end + 1..];
        } else {
            let end = rest.find(';').map_or(1, |i| i + 1);
            match decode_entity(&rest[..end]) {
                Some(c) => {
                    out.push(c);
                    rest = &rest[end..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
        }
    }
    out.push_str(rest);
    out
}

fn push_tag(out: &mut String, tag: &str) {
    if let Some(href) = tag
        .strip_prefix("<a href='")
        .and_then(|t| t.strip_suffix("'>"))
    {
        out.push_str("\x1b]8;;");
        out.push_str(&markup_to_ansi(href));
        out.push_str("\x1b\\");
    } else if tag == "</a>" {
        out.push_str(OSC8_CLOSE);
    } else if tag.starts_with("<span") {
        out.push_str(REVERSE);
    } else if tag == "</span>" {
        out.push_str(RESET);
    }
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "&amp;" => Some('&'),
        "&lt;" => Some('<'),
        "&gt;" => Some('>'),
        "&quot;" => Some('"'),
        "&#x27;" => Some('\''),
        "&#x2F;" => Some('/'),
        _ => None,
    }
}

/// Options for [`play`].
#[derive(Debug, Clone, Copy)]
pub struct PlayOptions {
    /// Cursor rows to type out before stopping.
    pub cycles: usize,
    /// Delay between ticks.
    pub delay: Duration,
}

/// Animate the screen: type each cursor row column by column, then scroll.
pub fn play<E: Entropy, W: Write>(
    screen: &mut Screen<E>,
    options: PlayOptions,
    out: &mut W,
) -> io::Result<()> {
    for row in screen.rows() {
        writeln!(out, "{}", markup_to_ansi(&row.markup))?;
    }
    writeln!(out)?;
    out.flush()?;

    for cycle in 0..options.cycles {
        debug!(cycle, "cursor cycle");
        for _ in 0..ROW_WIDTH {
            let line = markup_to_ansi(screen.tick());
            queue!(out, MoveUp(1), Clear(ClearType::CurrentLine))?;
            writeln!(out, "\r{line}")?;
            out.flush()?;
            thread::sleep(options.delay);
        }

        screen.scroll();
        redraw(screen, out)?;
    }
    Ok(())
}

/// Repaint every row plus an empty cursor line in place.
fn redraw<E: Entropy, W: Write>(screen: &Screen<E>, out: &mut W) -> io::Result<()> {
    let height = u16::try_from(screen.rows().len() + 1).unwrap_or(u16::MAX);
    queue!(out, MoveUp(height))?;
    for row in screen.rows() {
        queue!(out, Clear(ClearType::CurrentLine))?;
        writeln!(out, "\r{}", markup_to_ansi(&row.markup))?;
    }
    queue!(out, Clear(ClearType::CurrentLine))?;
    writeln!(out, "\r")?;
    out.flush()
}
