//! Rule-based listings that filter and sort catalog rows by field values.

use time::macros::format_description;
use time::Date;

use crate::catalog::Item;

pub const DEFAULT_TOP_N: usize = 10;
const RECENT_MOVIE_RATINGS: &[&str] = &["PG-13", "TV-MA"];
const INTERNATIONAL_TV: &str = "international tv shows";

/// Catalog row with a parsed `date_added`.
#[derive(Debug, Clone)]
pub struct DatedItem {
    pub item: Item,
    pub date_added: Date,
}

/// Parse `date_added` cells: "September 25, 2021", "Sep 25, 2021" or "2021-09-25".
pub fn parse_date_added(raw: &str) -> Option<Date> {
    let formats = [
        format_description!("[month repr:long] [day padding:none], [year]"),
        format_description!("[month repr:short] [day padding:none], [year]"),
        format_description!("[year]-[month]-[day]"),
    ];
    let raw = raw.trim();
    formats.iter().find_map(|format| Date::parse(raw, format).ok())
}

// Only empty cells count as missing; whitespace is a value.
fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

/// Keep rows with type, genres, date added, rating and title all present and the date parseable.
pub fn prepare(items: &[Item]) -> Vec<DatedItem> {
    let mut skipped = 0usize;
    let prepared: Vec<DatedItem> = items
        .iter()
        .filter_map(|item| {
            let complete = present(&item.kind)
                && present(&item.listed_in)
                && present(&item.rating)
                && !item.title.is_empty();
            let date = if complete { item.date_added.as_deref().and_then(parse_date_added) } else { None };
            if date.is_none() {
                skipped += 1;
            }
            date.map(|date_added| DatedItem { item: item.clone(), date_added })
        })
        .collect();
    tracing::info!(kept = prepared.len(), skipped, "prepared catalog for rule listings");
    prepared
}

fn newest_first<'a>(mut rows: Vec<&'a DatedItem>, top_n: usize) -> Vec<&'a DatedItem> {
    // stable: equal dates keep catalog order
    rows.sort_by(|a, b| b.date_added.cmp(&a.date_added));
    rows.truncate(top_n);
    rows
}

/// Movies rated PG-13 or TV-MA, newest additions first.
pub fn recent_movies(items: &[DatedItem], top_n: usize) -> Vec<&DatedItem> {
    let rows = items
        .iter()
        .filter(|d| d.item.kind.as_deref() == Some("Movie"))
        .filter(|d| d.item.rating.as_deref().is_some_and(|r| RECENT_MOVIE_RATINGS.contains(&r)))
        .collect();
    newest_first(rows, top_n)
}

pub fn international_tv_shows(items: &[DatedItem], top_n: usize) -> Vec<&DatedItem> {
    let rows = items
        .iter()
        .filter(|d| d.item.kind.as_deref() == Some("TV Show"))
        .filter(|d| {
            d.item
                .listed_in
                .as_deref()
                .is_some_and(|g| g.to_lowercase().contains(INTERNATIONAL_TV))
        })
        .collect();
    newest_first(rows, top_n)
}

pub fn most_recent(items: &[DatedItem], top_n: usize) -> Vec<&DatedItem> {
    newest_first(items.iter().collect(), top_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn row(title: &str, kind: &str, rating: &str, listed_in: &str, date: &str) -> Item {
        Item {
            title: title.into(),
            kind: Some(kind.into()),
            rating: Some(rating.into()),
            listed_in: Some(listed_in.into()),
            date_added: Some(date.into()),
            ..Item::default()
        }
    }

    fn catalog() -> Vec<Item> {
        vec![
            row("Old Movie", "Movie", "PG-13", "Dramas", "January 1, 2019"),
            row("New Movie", "Movie", "TV-MA", "Thrillers", "September 25, 2021"),
            row("Kids Movie", "Movie", "G", "Children & Family Movies", "September 24, 2021"),
            row("Show", "TV Show", "TV-MA", "International TV Shows, TV Dramas", " August 4, 2020"),
            row("Local Show", "TV Show", "TV-14", "Docuseries", "March 3, 2021"),
            row("Bad Date", "Movie", "PG-13", "Dramas", "sometime"),
            Item { date_added: None, ..row("No Date", "Movie", "PG-13", "Dramas", "") },
        ]
    }

    #[test]
    fn parses_long_month_dates() {
        assert_eq!(parse_date_added(" August 4, 2017"), Date::from_calendar_date(2017, Month::August, 4).ok());
        assert_eq!(parse_date_added("September 25, 2021"), Date::from_calendar_date(2021, Month::September, 25).ok());
        assert_eq!(parse_date_added("2021-09-25"), Date::from_calendar_date(2021, Month::September, 25).ok());
        assert_eq!(parse_date_added("Sep 5, 2021"), Date::from_calendar_date(2021, Month::September, 5).ok());
        assert_eq!(parse_date_added("sometime"), None);
        assert_eq!(parse_date_added(""), None);
    }

    #[test]
    fn prepare_drops_incomplete_rows() {
        let prepared = prepare(&catalog());
        let titles: Vec<&str> = prepared.iter().map(|d| d.item.title.as_str()).collect();
        assert_eq!(titles, vec!["Old Movie", "New Movie", "Kids Movie", "Show", "Local Show"]);
    }

    #[test]
    fn whitespace_cells_are_values_not_missing() {
        let items = vec![
            row("Spaced", "Movie", " ", "Dramas", "2021-01-02"),
            Item { rating: None, ..row("Unrated", "Movie", "", "Dramas", "2021-01-02") },
        ];
        let prepared = prepare(&items);
        let titles: Vec<&str> = prepared.iter().map(|d| d.item.title.as_str()).collect();
        assert_eq!(titles, vec!["Spaced"]);
    }

    #[test]
    fn recent_movies_filters_rating_and_sorts() {
        let prepared = prepare(&catalog());
        let titles: Vec<&str> = recent_movies(&prepared, 10).iter().map(|d| d.item.title.as_str()).collect();
        assert_eq!(titles, vec!["New Movie", "Old Movie"]);
    }

    #[test]
    fn international_shows_match_case_insensitively() {
        let mut items = catalog();
        items.push(row("Lower", "TV Show", "TV-14", "international tv shows", "May 1, 2021"));
        let prepared = prepare(&items);
        let titles: Vec<&str> = international_tv_shows(&prepared, 10).iter().map(|d| d.item.title.as_str()).collect();
        assert_eq!(titles, vec!["Lower", "Show"]);
    }

    #[test]
    fn most_recent_truncates() {
        let prepared = prepare(&catalog());
        let titles: Vec<&str> = most_recent(&prepared, 3).iter().map(|d| d.item.title.as_str()).collect();
        assert_eq!(titles, vec!["New Movie", "Kids Movie", "Local Show"]);
    }
}
