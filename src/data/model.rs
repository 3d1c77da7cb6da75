use std::collections::{BTreeSet, HashSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Stat – the numeric columns a record carries
// ---------------------------------------------------------------------------

/// One of the six numeric stat columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize)]
pub enum Stat {
    #[serde(rename = "HP")]
    Hp,
    Attack,
    Defense,
    #[serde(alias = "Sp_Atk")]
    SpAtk,
    #[serde(alias = "Sp_Def")]
    SpDef,
    Speed,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpAtk,
        Stat::SpDef,
        Stat::Speed,
    ];

    /// Position of the stat in [`Record::stats`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label used for axis titles.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::SpAtk => "SpAtk",
            Stat::SpDef => "SpDef",
            Stat::Speed => "Speed",
        }
    }

    /// Header names accepted for this column, preferred spelling first.
    pub fn header_aliases(self) -> &'static [&'static str] {
        match self {
            Stat::Hp => &["HP"],
            Stat::Attack => &["Attack"],
            Stat::Defense => &["Defense"],
            Stat::SpAtk => &["SpAtk", "Sp_Atk"],
            Stat::SpDef => &["SpDef", "Sp_Def"],
            Stat::Speed => &["Speed"],
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the file
// ---------------------------------------------------------------------------

/// Stable key of a record: its zero-based row index in the source file.
pub type RecordId = usize;

/// A single Pokémon (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub name: Option<String>,
    /// Primary type. `None` when the cell was empty or the column missing.
    pub category: Option<String>,
    /// Indexed by [`Stat::index`]. Malformed cells hold `NaN`.
    pub stats: [f64; 6],
}

impl Record {
    pub fn stat(&self, stat: Stat) -> f64 {
        self.stats[stat.index()]
    }

    /// Whether every listed stat holds a usable number.
    pub fn has_finite(&self, stats: &[Stat]) -> bool {
        stats.iter().all(|s| self.stat(*s).is_finite())
    }

    /// Label for tooltips: the name when known, otherwise the row number.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("row {}", self.id),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Distinct categories in the order they first appear.
    pub categories_in_order: Vec<String>,
    /// Distinct categories, sorted.
    pub categories: BTreeSet<String>,
}

impl Dataset {
    /// Build category indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut categories = BTreeSet::new();
        let mut categories_in_order = Vec::new();
        for cat in records.iter().filter_map(|r| r.category.as_ref()) {
            if categories.insert(cat.clone()) {
                categories_in_order.push(cat.clone());
            }
        }
        Dataset {
            records,
            categories_in_order,
            categories,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record ids equal row indices, so lookup is positional.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id).filter(|r| r.id == id)
    }

    /// All finite values of one stat.
    #[cfg(test)]
    pub fn finite_values(&self, stat: Stat) -> impl Iterator<Item = f64> + '_ {
        self.records
            .iter()
            .map(move |r| r.stat(stat))
            .filter(|v| v.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Selection – the brushed subset
// ---------------------------------------------------------------------------

/// A subset of records, keyed by [`RecordId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<RecordId>,
}

impl Selection {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Resolve the selection against the dataset, in row order.
    pub fn records<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        self.ids().into_iter().filter_map(|id| dataset.get(id)).collect()
    }
}

impl FromIterator<RecordId> for Selection {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        Selection {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
pub(crate) fn record(id: RecordId, category: Option<&str>, stats: [f64; 6]) -> Record {
    Record {
        id,
        name: Some(format!("mon{id}")),
        category: category.map(str::to_string),
        stats,
    }
}
