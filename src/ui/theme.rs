use crossterm::style::{Color, StyledContent, Stylize};

pub(crate) const ACCENT: Color = Color::Rgb { r: 137, g: 180, b: 250 };
pub(crate) const GREEN: Color = Color::Rgb { r: 166, g: 227, b: 161 };
pub(crate) const RED: Color = Color::Rgb { r: 243, g: 139, b: 168 };
pub(crate) const TEXT_DIM: Color = Color::Rgb { r: 127, g: 132, b: 156 };

pub(crate) fn heading(text: &str) -> StyledContent<&str> {
    text.with(ACCENT).bold()
}

pub(crate) fn success(text: &str) -> StyledContent<&str> {
    text.with(GREEN)
}

pub(crate) fn error(text: &str) -> StyledContent<&str> {
    text.with(RED)
}

pub(crate) fn dim(text: &str) -> StyledContent<&str> {
    text.with(TEXT_DIM)
}
