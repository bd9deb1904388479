//! Built-in spending categories and their display colors.

use once_cell::sync::Lazy;

/// The fixed category set every fresh dashboard starts with, with the hex
/// colors the charts use. User-defined categories simply appear in records
/// and carry no color of their own.
pub static BUILTIN_CATEGORIES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("Food & Drinks", "#e76f51"),
        ("Groceries", "#2a9d8f"),
        ("Transport", "#264653"),
        ("Housing", "#e9c46a"),
        ("Utilities", "#f4a261"),
        ("Health", "#9b5de5"),
        ("Entertainment", "#00bbf9"),
        ("Shopping", "#f15bb5"),
        ("Education", "#00f5d4"),
        ("Travel", "#fee440"),
        ("Other", "#adb5bd"),
    ]
});

/// Display color for a category, if it is one of the built-ins.
pub fn color_for(category: &str) -> Option<String> {
    BUILTIN_CATEGORIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, color)| (*color).to_string())
}
