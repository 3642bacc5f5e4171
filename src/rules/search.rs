use super::catalog::Rule;

pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Keyword search over rule id, names and description.
///
/// Matching is a case-insensitive substring test. Hits are ranked by how many
/// times the query occurs, then by id.
pub fn search_rules(rules: &[Rule], query: &str, limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<(usize, &str)> = rules
        .iter()
        .filter_map(|rule| {
            let haystack = [
                rule.id.as_str(),
                rule.name.as_str(),
                rule.name_cn.as_deref().unwrap_or_default(),
                rule.description.as_str(),
            ]
            .join(" ")
            .to_lowercase();

            let occurrences = haystack.matches(query.as_str()).count();
            (occurrences > 0).then_some((occurrences, rule.id.as_str()))
        })
        .collect();

    hits.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    hits.into_iter()
        .take(limit)
        .map(|(_, id)| id.to_string())
        .collect()
}
