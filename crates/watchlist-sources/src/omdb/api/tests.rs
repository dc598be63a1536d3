use super::*;

const SEARCH_BODY: &str = r#"{
    "Search": [
        {"Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie", "Poster": "https://example.com/matrix.jpg"},
        {"Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215", "Type": "movie", "Poster": "N/A"}
    ],
    "totalResults": "2",
    "Response": "True"
}"#;

const DETAIL_BODY: &str = r#"{
    "Title": "Movie A",
    "Year": "2020",
    "Rated": "PG-13",
    "Runtime": "120 min",
    "Poster": "https://example.com/a.jpg",
    "imdbID": "tt001",
    "Type": "movie",
    "Response": "True"
}"#;

#[test]
fn test_parse_search_response() {
    let results = parse_search_response(SEARCH_BODY).unwrap();
    let movies = results.movies();

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].id, MovieId::from("tt0133093"));
    assert_eq!(movies[0].title, "The Matrix");
    assert_eq!(movies[1].year, "2003");
    assert_eq!(movies[1].poster(), None);
}

#[test]
fn test_parse_search_not_found() {
    let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
    assert_eq!(parse_search_response(body).unwrap(), SearchResults::NoResults);
}

#[test]
fn test_parse_search_api_error() {
    let body = r#"{"Response": "False", "Error": "Invalid API key!"}"#;
    match parse_search_response(body) {
        Err(SourceError::Api(message)) => assert_eq!(message, "Invalid API key!"),
        other => panic!("expected api error, got {:?}", other),
    }
}

#[test]
fn test_parse_search_malformed() {
    assert!(matches!(parse_search_response("<html>"), Err(SourceError::Decode(_))));
}

#[test]
fn test_parse_detail_response() {
    let movie = parse_detail_response(DETAIL_BODY).unwrap();
    assert_eq!(movie.id, MovieId::from("tt001"));
    assert_eq!(movie.title, "Movie A");
    assert_eq!(movie.year, "2020");
    assert_eq!(movie.poster_url, "https://example.com/a.jpg");
}

#[test]
fn test_parse_detail_incorrect_id() {
    let body = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
    assert!(matches!(parse_detail_response(body), Err(SourceError::Api(_))));
}

#[test]
fn test_parse_detail_missing_fields() {
    let body = r#"{"Response": "True", "Title": "No id here"}"#;
    assert!(matches!(parse_detail_response(body), Err(SourceError::Decode(_))));
}
