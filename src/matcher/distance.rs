//! Edit distance used by the fuzzy tier of the resolver.

/// Distance from `query` to `target`, measured against every same-length
/// window of `target` when the query is shorter.
///
/// A query that is a true fragment of a longer title scores 0 wherever the
/// fragment sits. Lengths count chars, not bytes.
pub fn windowed_distance(query: &str, target: &str) -> usize {
    let query_len = query.chars().count();
    let bounds: Vec<usize> = target
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(target.len()))
        .collect();
    let target_len = bounds.len() - 1;

    if query_len == 0 || query_len >= target_len {
        return strsim::levenshtein(query, target);
    }

    bounds
        .windows(query_len + 1)
        .map(|w| strsim::levenshtein(query, &target[w[0]..w[query_len]]))
        .min()
        .unwrap_or(query_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_distance() {
        assert_eq!(windowed_distance("kitten", "sitting"), 3);
        assert_eq!(windowed_distance("heyjude", "heyjude"), 0);
        assert_eq!(windowed_distance("", "abc"), 3);
        assert_eq!(windowed_distance("abc", ""), 3);
    }

    #[test]
    fn test_windowed_distance_fragment_anywhere_is_zero() {
        let title = "aharddaysnight";
        assert_eq!(windowed_distance("ahard", title), 0);
        assert_eq!(windowed_distance("days", title), 0);
        assert_eq!(windowed_distance("night", title), 0);
    }

    #[test]
    fn test_windowed_distance_typo_in_fragment() {
        assert_eq!(windowed_distance("feilds", "strawberryfieldsforever"), 2);
    }

    #[test]
    fn test_windowed_distance_longer_query_uses_full_title() {
        assert_eq!(windowed_distance("heyjudee", "heyjude"), 1);
    }

    #[test]
    fn test_windowed_distance_multibyte_windows() {
        assert_eq!(windowed_distance("ウェー", "ノルウェーの森"), 0);
        assert_eq!(windowed_distance("ウエー", "ノルウェーの森"), 1);
    }
}
