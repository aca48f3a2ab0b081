use is_terminal::IsTerminal;
use owo_colors::AnsiColors;
use prompttree_engine::PALETTE_SIZE;

const PALETTE: [AnsiColors; PALETTE_SIZE] = [
    AnsiColors::Red,
    AnsiColors::Yellow,
    AnsiColors::Green,
    AnsiColors::Cyan,
    AnsiColors::Blue,
    AnsiColors::Magenta,
    AnsiColors::BrightRed,
];

/// Terminal colour for a prompt's palette index
pub fn palette_color(index: usize) -> AnsiColors {
    PALETTE[index % PALETTE_SIZE]
}

/// Colour only when writing to a terminal and NO_COLOR is unset
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}
