use recsys_core::tokenizer::tokenize;

#[test]
fn it_normalizes_and_lowercases() {
    let words = tokenize("Ｃhess PRODIGY! The café's menu.");
    // NFKC folds the full-width letter before lowercasing
    assert!(words.contains(&"chess".to_string()));
    assert!(words.contains(&"prodigy".to_string()));
    assert!(words.contains(&"café".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog show");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(!words.contains(&"show".to_string()));
    assert_eq!(words, vec!["quick", "brown", "fox", "lazy", "dog"]);
}

#[test]
fn it_splits_genre_tags() {
    let words = tokenize("International TV Shows, TV Dramas, Sci-Fi & Fantasy");
    assert_eq!(words, vec!["international", "tv", "shows", "tv", "dramas", "sci", "fi", "fantasy"]);
}
