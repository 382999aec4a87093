//! Category display formatting

use crate::models::Category;

/// Table of the fixed trade categories with their ids
pub fn format_category_list() -> String {
    let id_width = Category::all()
        .iter()
        .map(|c| c.id().len())
        .max()
        .unwrap_or(2);

    let mut output = String::new();
    output.push_str(&format!("   {:<id_width$}  {}\n", "ID", "Name", id_width = id_width));
    output.push_str(&format!("   {:-<id_width$}  {:-<20}\n", "", "", id_width = id_width));
    for category in Category::all() {
        output.push_str(&format!(
            "{}  {:<id_width$}  {}\n",
            category.icon(),
            category.id(),
            category.display_name(),
            id_width = id_width
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_category() {
        let text = format_category_list();
        for category in Category::all() {
            assert!(text.contains(category.id()));
        }
        assert!(text.contains("waste_disposal"));
        assert!(text.contains("Windows & Doors"));
    }
}
