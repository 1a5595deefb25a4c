use crate::style::Style;

pub struct Ui {
    style: Style,
    width: usize,
}

impl Ui {
    pub fn new(style: Style) -> Self {
        Self { style, width: 40 }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn rule(&self) -> String {
        "-".repeat(self.width)
    }

    pub fn ok_line(&self, message: &str) -> String {
        format!("{} {}", self.style.ok(), message)
    }

    pub fn info_line(&self, message: &str) -> String {
        format!("{} {}", self.style.arrow(), message)
    }

    pub fn list_item(&self, label: &str, status: &str) -> String {
        let label_width = 30usize;
        let dots = if label.len() >= label_width {
            String::new()
        } else {
            ".".repeat(label_width - label.len())
        };

        format!("  {} {label}{dots} {status}", self.style.bullet())
    }
}
