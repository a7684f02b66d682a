use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::Yellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const ADDRESS: Color = Color::TrueColor {
    r: 96,
    g: 165,
    b: 250,
};
pub const IPMI: Color = Color::TrueColor {
    r: 250,
    g: 176,
    b: 5,
};
pub const PROXMOX: Color = Color::TrueColor {
    r: 229,
    g: 112,
    b: 0,
};
