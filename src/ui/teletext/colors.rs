use crossterm::style::Color;

// Teletext palette
pub fn header_bg() -> Color {
    Color::AnsiValue(21)
} // Bright blue
pub fn header_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn title_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn text_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn border_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan
pub fn background_fg() -> Color {
    Color::AnsiValue(240)
} // Grey
pub fn status_fg() -> Color {
    Color::AnsiValue(226)
} // Bright yellow
pub fn box_bg() -> Color {
    Color::AnsiValue(16)
} // Black

/// Extracts the 256-colour index, falling back when the colour is not an indexed one.
pub fn get_ansi_code(color: Color, fallback: u8) -> u8 {
    match color {
        Color::AnsiValue(val) => val,
        _ => fallback,
    }
}
