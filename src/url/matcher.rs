/// Checks whether any of the markers occurs in the candidate text
///
/// Matching is plain substring search, so a marker inside a query string or
/// fragment counts the same as one in the path. Blank markers never match.
///
/// # Examples
///
/// ```
/// use prodscrape::url::contains_any;
///
/// let markers = ["/dp/".to_string(), "/gp/".to_string()];
/// assert!(contains_any("https://www.amazon.com/x/dp/B01", &markers));
/// assert!(contains_any("https://www.amazon.com/?next=/gp/product", &markers));
/// assert!(!contains_any("https://www.amazon.com/", &markers));
/// ```
pub fn contains_any(candidate: &str, markers: &[String]) -> bool {
    markers
        .iter()
        .filter(|marker| !marker.is_empty())
        .any(|marker| candidate.contains(marker.as_str()))
}
