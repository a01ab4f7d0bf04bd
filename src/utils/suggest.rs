/// Near-miss candidates for an unrecognized name, closest first.
pub fn suggest(input: &str, candidates: &[String], limit: usize) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() || candidates.is_empty() {
        return Vec::new();
    }
    let allowed = (needle.len() / 3).max(2);

    let mut scored: Vec<(usize, &String)> = candidates
        .iter()
        .map(|candidate| (distance(&needle, &candidate.to_lowercase()), candidate))
        .filter(|(score, _)| *score <= allowed)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit.max(1))
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

fn distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = if ca == *cb { 0 } else { 1 };
            let next = (diagonal + cost).min(row[j] + 1).min(row[j + 1] + 1);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["search_products", "view_cart", "add_to_cart"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn close_misspellings_are_suggested_first() {
        let out = suggest("serch_products", &names(), 3);
        assert_eq!(out.first().map(String::as_str), Some("search_products"));
    }

    #[test]
    fn distant_inputs_yield_nothing() {
        assert!(suggest("completely_unrelated_xyz", &names(), 3).is_empty());
        assert!(suggest("  ", &names(), 3).is_empty());
    }
}
