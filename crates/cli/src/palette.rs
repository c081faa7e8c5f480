use colored::Color;
use taskdir_core::EntryKind;

/// Get a consistent color for a task name
pub fn get_task_color(task_name: &str) -> Color {
    // Simple hash of the name bytes so a task keeps its color across runs
    let hash = task_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

    // Jewel tones, kept clear of the red/yellow/green used for status
    let colors = [
        Color::TrueColor {
            r: 147,
            g: 112,
            b: 219,
        },
        Color::TrueColor {
            r: 64,
            g: 224,
            b: 208,
        },
        Color::TrueColor {
            r: 255,
            g: 140,
            b: 0,
        },
        Color::TrueColor {
            r: 199,
            g: 21,
            b: 133,
        },
        Color::TrueColor {
            r: 72,
            g: 209,
            b: 204,
        },
        Color::TrueColor {
            r: 138,
            g: 43,
            b: 226,
        },
    ];

    colors[(hash % colors.len() as u64) as usize]
}

/// Color used for a member's kind label
pub fn kind_color(kind: EntryKind) -> Color {
    match kind {
        EntryKind::Script => Color::Cyan,
        EntryKind::Binary => Color::Blue,
        EntryKind::Group => Color::Magenta,
        EntryKind::Config | EntryKind::Other => Color::BrightBlack,
    }
}
