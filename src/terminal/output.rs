//! Terminal output utilities.
//!
//! Boxes are drawn on stderr so stdout only ever carries the password.

// ============================================================================
// ANSI Color Constants
// ============================================================================

pub const RESET: &str = "\x1b[0m";
pub const YELLOW: &str = "\x1b[33m";
pub const RED: &str = "\x1b[31m";

// ============================================================================
// Box Drawing (74 char width)
// ============================================================================

pub const BOX_WIDTH: usize = 74;

/// Print box top with optional title: ┌─ Title ───────────────────────────┐
pub fn box_top(title: &str) {
    if title.is_empty() {
        eprintln!("┌{}┐", "─".repeat(BOX_WIDTH - 2));
    } else {
        let title_part = format!("─ {} ", title);
        let remaining = (BOX_WIDTH - 2).saturating_sub(title_part.chars().count());
        eprintln!("┌{}{}┐", title_part, "─".repeat(remaining));
    }
}

/// Print box content lines, wrapping anything wider than the box.
pub fn box_line(content: &str) {
    let inner_width = BOX_WIDTH - 4;
    let chars: Vec<char> = content.chars().collect();

    if chars.is_empty() {
        eprintln!("│ {} │", " ".repeat(inner_width));
        return;
    }
    for row in chars.chunks(inner_width) {
        let row: String = row.iter().collect();
        let padding = inner_width - row.chars().count();
        eprintln!("│ {}{} │", row, " ".repeat(padding));
    }
}

/// Print box bottom: └───────────────────────────────────────────────────────┘
pub fn box_bottom() {
    eprintln!("└{}┘", "─".repeat(BOX_WIDTH - 2));
}

// ============================================================================
// Entropy Estimate
// ============================================================================

/// Upper bound of password entropy in bits for a uniformly chosen password.
///
/// A derived password has at most as much entropy as its key, so this only
/// describes the output space.
pub fn calculate_entropy(password_length: usize, charset_size: usize) -> f64 {
    if charset_size == 0 {
        return 0.0;
    }
    password_length as f64 * (charset_size as f64).log2()
}

/// Get entropy strength description.
pub fn entropy_strength(bits: f64) -> &'static str {
    match bits as u32 {
        0..=35 => "Weak",
        36..=59 => "Fair",
        60..=127 => "Strong",
        _ => "Very Strong",
    }
}
