//! Static HTML page for a dump.
//!
//! The page mirrors the layout the animation works against: a list of
//! completed rows (`#dump`) and a cursor row (`#cursor`) below it.

use std::fmt::Write;

use dumper_core::{Entropy, escape};

use crate::screen::Screen;

/// Configuration for page export.
#[derive(Debug, Clone)]
pub struct PageExporter {
    /// Document title.
    pub title: String,
    /// Font family for the rows.
    pub font_family: String,
    /// Font size (CSS value).
    pub font_size: String,
}

impl Default for PageExporter {
    fn default() -> Self {
        Self {
            title: "dumper".into(),
            font_family: "monospace".into(),
            font_size: "14px".into(),
        }
    }
}

impl PageExporter {
    /// Export the screen to a complete HTML document.
    pub fn export<E: Entropy>(&self, screen: &Screen<E>) -> String {
        let mut out = String::with_capacity(screen.rows().len() * 256 + 1024);

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset='utf-8'>\n");
        let _ = writeln!(out, "<title>{}</title>", escape(&self.title));
        let _ = writeln!(
            out,
            "<style>\
             body{{background:#000;color:#0c0;}}\
             ul{{list-style:none;margin:0;padding:0;}}\
             pre{{margin:0;font-family:{};font-size:{};}}\
             a{{color:#0f0;text-decoration:none;}}\
             .c{{background:#0c0;color:#000;}}\
             </style>",
            self.font_family, self.font_size,
        );
        out.push_str("</head>\n<body>\n<ul id='dump'>\n");

        for row in screen.rows() {
            out.push_str("<li><pre>");
            out.push_str(&row.markup);
            out.push_str("</pre></li>\n");
        }

        out.push_str("</ul>\n<div id='cursor'>");
        if !screen.cursor().is_empty() {
            out.push_str("<pre>");
            out.push_str(screen.cursor());
            out.push_str("</pre>");
        }
        out.push_str("</div>\n</body>\n</html>\n");
        out
    }
}
