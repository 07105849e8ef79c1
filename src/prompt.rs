use inksac::prelude::*;

/// Renders the prompt string, in red unless colors are unavailable or
/// explicitly disabled with the monochrome flag.
#[derive(Debug, Clone, Copy)]
pub struct PromptRenderer {
    color_support: ColorSupport,
    monochrome: bool,
}

impl PromptRenderer {
    pub fn new(monochrome: bool) -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
            monochrome,
        }
    }

    pub fn render(&self, prompt: &str) -> String {
        if self.monochrome || matches!(self.color_support, ColorSupport::NoColor) {
            return format!("{} ", prompt);
        }

        let prompt_style = Style::builder().foreground(Color::Red).build();
        format!("{} ", prompt.style(prompt_style))
    }
}
