use crate::catalog::Item;

/// Combine the descriptive fields of one item into a single document.
///
/// Missing fields become empty text, so the separator space is always present.
pub fn compose(description: Option<&str>, genres: Option<&str>) -> String {
    let description = description.unwrap_or("");
    let genres = genres.unwrap_or("");
    let mut doc = String::with_capacity(description.len() + genres.len() + 1);
    doc.push_str(description);
    doc.push(' ');
    doc.push_str(genres);
    doc
}

pub fn compose_item(item: &Item) -> String {
    compose(item.description.as_deref(), item.listed_in.as_deref())
}

/// One document per item, position i belonging to item i.
pub fn compose_all(items: &[Item]) -> Vec<String> {
    items.iter().map(compose_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_space() {
        assert_eq!(compose(Some("space adventure"), Some("Sci-Fi")), "space adventure Sci-Fi");
    }

    #[test]
    fn missing_fields_are_empty() {
        assert_eq!(compose(None, Some("Food")), " Food");
        assert_eq!(compose(Some("cooking show"), None), "cooking show ");
        assert_eq!(compose(None, None), " ");
    }

    #[test]
    fn keeps_item_order() {
        let items = vec![Item::new("A", Some("one"), None), Item::new("B", None, Some("two"))];
        assert_eq!(compose_all(&items), vec!["one ".to_string(), " two".to_string()]);
    }
}
