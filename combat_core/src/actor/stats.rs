//! Named numeric stats

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stat keys an actor may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Health,
    MaxHealth,
    Attack,
    Defense,
    Speed,
    /// Natural speed before buffs, reference point for haste-dysphoria
    BaseSpeed,
    /// Critical hit chance in percent
    Crit,
    /// Hit chance in percent before blessed/cursed modifiers
    Accuracy,
    HealMultiplier,
    Vision,
    Stamina,
}

impl Stat {
    /// Value read when the stat is absent
    pub fn default_value(&self) -> f64 {
        match self {
            Stat::HealMultiplier => 1.0,
            Stat::Accuracy => 100.0,
            _ => 0.0,
        }
    }
}

/// Ordered stat map. Absent keys read as [`Stat::default_value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats(BTreeMap<Stat, f64>);

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.0.get(&stat).copied().unwrap_or_else(|| stat.default_value())
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        self.0.insert(stat, value);
    }

    pub fn contains(&self, stat: Stat) -> bool {
        self.0.contains_key(&stat)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Stat, &f64)> {
        self.0.iter()
    }
}

impl FromIterator<(Stat, f64)> for Stats {
    fn from_iter<I: IntoIterator<Item = (Stat, f64)>>(iter: I) -> Self {
        Stats(iter.into_iter().collect())
    }
}
