//! Detection of near-duplicate entries in a list of names.
//!
//! Every pair of names is compared with a normalized string similarity in [0, 1].
//! Pairs above a threshold are reported once, in the order they are found.
//!
//! ```
//! use survey_stats::similarity::{scan_pairs, Metric};
//!
//! let names = vec!["alice".to_string(), "alise".to_string(), "bob".to_string()];
//! let pairs = scan_pairs(&names, Metric::JaroWinkler, 0.9);
//! assert_eq!(pairs.len(), 1);
//! assert_eq!((pairs[0].first.as_str(), pairs[0].second.as_str()), ("alice", "alise"));
//! ```

use log::{debug, info};

use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

pub const DEFAULT_THRESHOLD: f64 = 0.90;

/// The similarity metric. Both are deterministic.
///
/// Jaro-Winkler favours names sharing a prefix, so that one-letter typos such
/// as `alice`/`alise` clear a 0.90 threshold that plain Jaro (0.87) does not.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum Metric {
    Jaro,
    #[default]
    JaroWinkler,
}

impl Metric {
    pub fn score(&self, a: &str, b: &str) -> f64 {
        match self {
            Metric::Jaro => strsim::jaro(a, b),
            Metric::JaroWinkler => strsim::jaro_winkler(a, b),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jaro" => Ok(Metric::Jaro),
            "jaro-winkler" | "jaro_winkler" => Ok(Metric::JaroWinkler),
            x => Err(format!("unknown metric {:?} (expected jaro or jaro-winkler)", x)),
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Jaro => write!(f, "jaro"),
            Metric::JaroWinkler => write!(f, "jaro-winkler"),
        }
    }
}

/// Two distinct names that are similar enough.
#[derive(PartialEq, Debug, Clone)]
pub struct NamePair {
    pub first: String,
    pub second: String,
    pub score: f64,
}

/// Compares all the names with each other and keeps the pairs scoring strictly
/// above the threshold.
///
/// Identical names are never paired, even when they come from distinct entries,
/// and a pair is only kept in the orientation it was first found in.
pub fn scan_pairs(names: &[String], metric: Metric, threshold: f64) -> Vec<NamePair> {
    info!(
        "Comparing {} names with {} (threshold {})",
        names.len(),
        metric,
        threshold
    );
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut res: Vec<NamePair> = Vec::new();
    for (count, n) in names.iter().enumerate() {
        info!("Completed: {}", count);
        for n2 in names.iter() {
            if n == n2 {
                continue;
            }
            let score = metric.score(n, n2);
            if score <= threshold {
                continue;
            }
            // Keyed on the ordered pair so that (b, a) is recognized once (a, b) is in.
            let key = if n <= n2 {
                (n.as_str(), n2.as_str())
            } else {
                (n2.as_str(), n.as_str())
            };
            if seen.insert(key) {
                debug!("scan_pairs: {:?} ~ {:?}: {}", n, n2, score);
                res.push(NamePair {
                    first: n.clone(),
                    second: n2.clone(),
                    score,
                });
            }
        }
    }
    info!("Found {} similar pairs", res.len());
    res
}
