pub mod report;
pub mod table;

use owo_colors::{OwoColorize, Style};

/// Applies owo-colors styles only when colour output is enabled.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    colors: bool,
}

impl Theme {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> bool {
        self.colors
    }

    pub fn paint(&self, text: &str, style: Style) -> String {
        if self.colors {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, Style::new().green().bold())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, Style::new().red().bold())
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Style::new().yellow())
    }

    pub fn info(&self, text: &str) -> String {
        self.paint(text, Style::new().blue())
    }

    pub fn id(&self, text: &str) -> String {
        self.paint(text, Style::new().yellow())
    }
}
