use crate::domain::model::{AggregationResult, FrequencyTable, RankedEntry};

pub const DEFAULT_TOP_N: usize = 10;

/// The `n` highest-count entries, descending. Ties keep insertion order.
pub fn top_n(table: &FrequencyTable, n: usize) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = table.iter().collect();
    // sort_by 為穩定排序，同數量時保留原本出現順序
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

pub fn ranked(table: &FrequencyTable, n: usize) -> Vec<RankedEntry> {
    top_n(table, n)
        .into_iter()
        .map(|(category, count)| RankedEntry {
            category: category.to_string(),
            count,
        })
        .collect()
}

impl AggregationResult {
    /// Top [`DEFAULT_TOP_N`] locations.
    pub fn top_locations(&self) -> Vec<(&str, u64)> {
        top_n(&self.locations, DEFAULT_TOP_N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(keys: &[&str]) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for key in keys {
            table.increment(key);
        }
        table
    }

    #[test]
    fn test_top_n_sorts_descending_with_stable_ties() {
        let source = table(&["LA", "SF", "NYC", "NYC", "SF", "Austin"]);

        let top = top_n(&source, 3);

        assert_eq!(top, vec![("SF", 2), ("NYC", 2), ("LA", 1)]);
    }

    #[test]
    fn test_top_n_bounds() {
        let source = table(&["LA", "NYC", "NYC"]);

        assert!(top_n(&source, 0).is_empty());
        assert_eq!(top_n(&source, 50), vec![("NYC", 2), ("LA", 1)]);
    }

    #[test]
    fn test_top_locations_returns_ten_highest() {
        let mut keys = Vec::new();
        let cities: Vec<String> = (0..15).map(|i| format!("City{}", i)).collect();
        for (i, city) in cities.iter().enumerate() {
            for _ in 0..=i {
                keys.push(city.as_str());
            }
        }
        let result = AggregationResult {
            locations: table(&keys),
            ..Default::default()
        };

        let top = result.top_locations();

        assert_eq!(top.len(), DEFAULT_TOP_N);
        assert_eq!(top[0], ("City14", 15));
        let lowest_returned = top.iter().map(|(_, c)| *c).min().unwrap();
        let returned: Vec<&str> = top.iter().map(|(k, _)| *k).collect();
        for (key, count) in result.locations.iter() {
            if !returned.contains(&key) {
                assert!(count <= lowest_returned);
            }
        }
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_top_n_does_not_mutate_source() {
        let source = table(&["LA", "NYC", "NYC"]);
        let before = source.clone();

        let _ = top_n(&source, 1);

        assert_eq!(source, before);
    }
}
