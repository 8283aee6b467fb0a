// render.rs - Render collaborator and title extraction

use crate::navigation::NavButtons;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::Write;

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title regex is valid");
}

/// Text of the first `<title>` element, or an empty string
pub fn extract_title(body: &str) -> String {
    TITLE_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// Everything the window needs from a display surface
pub trait Render {
    fn set_address(&mut self, address: &str);

    fn render_page(&mut self, body: &str, title: &str);

    /// A fetched response, shown with its status code in the title
    fn render_status(&mut self, status: u16, title: &str, body: &str) {
        let title = format!("{} {}", status, title);
        self.render_page(body, title.trim_end());
    }

    fn set_nav_buttons(&mut self, buttons: NavButtons);
}

/// Plain-text renderer for the terminal
pub struct TerminalRenderer<W: Write> {
    out: W,
    max_body_chars: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, max_body_chars: usize) -> Self {
        Self { out, max_body_chars }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            log::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> Render for TerminalRenderer<W> {
    fn set_address(&mut self, address: &str) {
        self.emit(format_args!("-> {}", address));
    }

    fn render_page(&mut self, body: &str, title: &str) {
        self.emit(format_args!("== {} ==", title));
        let shown: String = body.chars().take(self.max_body_chars).collect();
        self.emit(format_args!("{}", shown));
        if shown.len() < body.len() {
            self.emit(format_args!("... ({} more bytes)", body.len() - shown.len()));
        }
    }

    fn set_nav_buttons(&mut self, buttons: NavButtons) {
        let flag = |on: bool, label: &'static str| if on { label } else { "-" };
        self.emit(format_args!(
            "[{}] [{}] [{}]",
            flag(buttons.back, "back"),
            flag(buttons.forward, "forward"),
            flag(buttons.refresh, "refresh"),
        ));
    }
}
