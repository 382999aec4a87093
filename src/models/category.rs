//! Trade category taxonomy
//!
//! Every line item belongs to exactly one trade. The set is fixed reference
//! data: ids are stable strings used in persisted files, and the declaration
//! order is the order reports list categories in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A construction trade used to group estimate line items
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Demolition,
    Carpentry,
    Electrical,
    Plumbing,
    Waterproofing,
    Tiling,
    Flooring,
    Painting,
    Wallpaper,
    Windows,
    Kitchen,
    Bathroom,
    Lighting,
    Furniture,
    Cleaning,
    WasteDisposal,
    /// Anything that does not fit a trade above, including unknown ids
    #[serde(other)]
    Other,
}

impl Category {
    /// All categories in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::Demolition,
            Self::Carpentry,
            Self::Electrical,
            Self::Plumbing,
            Self::Waterproofing,
            Self::Tiling,
            Self::Flooring,
            Self::Painting,
            Self::Wallpaper,
            Self::Windows,
            Self::Kitchen,
            Self::Bathroom,
            Self::Lighting,
            Self::Furniture,
            Self::Cleaning,
            Self::WasteDisposal,
            Self::Other,
        ]
    }

    /// Stable identifier, identical to the serialized form
    pub fn id(&self) -> &'static str {
        match self {
            Self::Demolition => "demolition",
            Self::Carpentry => "carpentry",
            Self::Electrical => "electrical",
            Self::Plumbing => "plumbing",
            Self::Waterproofing => "waterproofing",
            Self::Tiling => "tiling",
            Self::Flooring => "flooring",
            Self::Painting => "painting",
            Self::Wallpaper => "wallpaper",
            Self::Windows => "windows",
            Self::Kitchen => "kitchen",
            Self::Bathroom => "bathroom",
            Self::Lighting => "lighting",
            Self::Furniture => "furniture",
            Self::Cleaning => "cleaning",
            Self::WasteDisposal => "waste_disposal",
            Self::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Demolition => "Demolition",
            Self::Carpentry => "Carpentry",
            Self::Electrical => "Electrical",
            Self::Plumbing => "Plumbing",
            Self::Waterproofing => "Waterproofing",
            Self::Tiling => "Tiling",
            Self::Flooring => "Flooring",
            Self::Painting => "Painting",
            Self::Wallpaper => "Wallpaper",
            Self::Windows => "Windows & Doors",
            Self::Kitchen => "Kitchen",
            Self::Bathroom => "Bathroom",
            Self::Lighting => "Lighting",
            Self::Furniture => "Built-in Furniture",
            Self::Cleaning => "Cleaning",
            Self::WasteDisposal => "Waste Disposal",
            Self::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Demolition => "🔨",
            Self::Carpentry => "🪚",
            Self::Electrical => "⚡",
            Self::Plumbing => "🚰",
            Self::Waterproofing => "💧",
            Self::Tiling => "🧱",
            Self::Flooring => "🪵",
            Self::Painting => "🎨",
            Self::Wallpaper => "📜",
            Self::Windows => "🪟",
            Self::Kitchen => "🍳",
            Self::Bathroom => "🛁",
            Self::Lighting => "💡",
            Self::Furniture => "🗄",
            Self::Cleaning => "🧹",
            Self::WasteDisposal => "🗑",
            Self::Other => "📦",
        }
    }

    /// Look up a category by its id or display name (case-insensitive)
    pub fn from_id(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::all().iter().copied().find(|c| {
            c.id().eq_ignore_ascii_case(text) || c.display_name().eq_ignore_ascii_case(text)
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_round_trip() {
        for category in Category::all() {
            assert_eq!(Category::from_id(category.id()), Some(*category));
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.id()));
        }

        let mut ids: Vec<_> = Category::all().iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Category::all().len());
    }

    #[test]
    fn test_order_follows_declaration() {
        let mut sorted = Category::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, Category::all());
        assert!(Category::Demolition < Category::Flooring);
    }

    #[test]
    fn test_lookup_by_display_name() {
        assert_eq!(Category::from_id("windows & doors"), Some(Category::Windows));
        assert_eq!(Category::from_id(" FLOORING "), Some(Category::Flooring));
        assert_eq!(Category::from_id("roofing"), None);
    }

    #[test]
    fn test_unknown_id_deserializes_to_other() {
        let category: Category = serde_json::from_str("\"roofing\"").unwrap();
        assert_eq!(category, Category::Other);
    }
}
