use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// 單一儲存格經型別推斷後的值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl CellValue {
    /// 非 Null 且非空字串才算有值；數字 0 與 false 仍算有值
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Null => false,
            CellValue::String(s) => !s.is_empty(),
            CellValue::Boolean(_) | CellValue::Number(_) => true,
        }
    }
}

/// Renders the category key used when counting.
///
/// Integral numbers drop the fractional part (`50.0` -> `50`), other numbers
/// use the shortest round-trip form. `Null` renders as the empty string.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Number(n) => {
                // 推斷時已限制在 ±2^53 內，轉成 i64 不會溢位
                if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::String(s) => f.write_str(s),
        }
    }
}

/// Largest integer an f64 represents exactly (2^53).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// One parsed row: header-derived field name to typed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.data.get(field)
    }

    /// Returns the value only when it is present and non-empty.
    pub fn present(&self, field: &str) -> Option<&CellValue> {
        self.data.get(field).filter(|value| value.is_present())
    }
}

impl FromIterator<(String, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

/// The four fields the aggregator tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedField {
    Industry,
    CompanySize,
    Location,
    Status,
}

impl TrackedField {
    pub const ALL: [TrackedField; 4] = [
        TrackedField::Industry,
        TrackedField::CompanySize,
        TrackedField::Location,
        TrackedField::Status,
    ];

    /// 對應 CSV 標頭的欄位名稱
    pub fn field_name(self) -> &'static str {
        match self {
            TrackedField::Industry => "industry",
            TrackedField::CompanySize => "companySize",
            TrackedField::Location => "location",
            TrackedField::Status => "status",
        }
    }

    /// 在 AggregationResult 中的鍵名
    pub fn table_name(self) -> &'static str {
        match self {
            TrackedField::Industry => "industries",
            TrackedField::CompanySize => "companySizes",
            TrackedField::Location => "locations",
            TrackedField::Status => "interactionStatus",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TrackedField::Industry => "Industries",
            TrackedField::CompanySize => "Company Sizes",
            TrackedField::Location => "Locations",
            TrackedField::Status => "Interaction Status",
        }
    }
}

/// Category -> count, iterated in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// Count for `key`, zero when the key was never seen.
    pub fn count(&self, key: &str) -> u64 {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// The four frequency tables produced from one input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub industries: FrequencyTable,
    pub company_sizes: FrequencyTable,
    pub locations: FrequencyTable,
    pub interaction_status: FrequencyTable,
}

impl AggregationResult {
    pub fn table(&self, field: TrackedField) -> &FrequencyTable {
        match field {
            TrackedField::Industry => &self.industries,
            TrackedField::CompanySize => &self.company_sizes,
            TrackedField::Location => &self.locations,
            TrackedField::Status => &self.interaction_status,
        }
    }

    pub(crate) fn table_mut(&mut self, field: TrackedField) -> &mut FrequencyTable {
        match field {
            TrackedField::Industry => &mut self.industries,
            TrackedField::CompanySize => &mut self.company_sizes,
            TrackedField::Location => &mut self.locations,
            TrackedField::Status => &mut self.interaction_status,
        }
    }

    pub fn tables(&self) -> impl Iterator<Item = (TrackedField, &FrequencyTable)> + '_ {
        TrackedField::ALL
            .into_iter()
            .map(move |field| (field, self.table(field)))
    }

    pub fn is_empty(&self) -> bool {
        self.tables().all(|(_, table)| table.is_empty())
    }
}

/// One entry of a top-N view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub category: String,
    pub count: u64,
}

/// Transform output handed to the load phase.
#[derive(Debug, Clone)]
pub struct LeadAnalysis {
    pub source: String,
    pub records: Vec<Record>,
    pub stats: AggregationResult,
    pub top_locations: Vec<RankedEntry>,
}

impl LeadAnalysis {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
