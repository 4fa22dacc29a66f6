use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightMagenta;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const FOUND: Color = Color::BrightCyan;
