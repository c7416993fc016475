//! Colored status output for the command line tool.

use owo_colors::OwoColorize;

pub struct TextPrinter {
    pub color: Option<&'static str>,
}

impl TextPrinter {
    pub fn print(&self, text: &str) {
        if let Some(c) = self.color {
            match c {
                "green" => eprintln!("{}", text.green()),
                "yellow" => eprintln!("{}", text.yellow()),
                "red" => eprintln!("{}", text.red()),
                _ => eprintln!("{}", text),
            }
        } else {
            eprintln!("{}", text);
        }
    }
}
