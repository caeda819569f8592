//! Combination search: every way to spell a digit string with terms.
//!
//! A digit string is decoded into the terms that encode it directly, followed
//! by every pair `(prefix, suffix)` of decodings obtained by splitting the
//! string at an interior point, recursively. Split points are visited
//! middle-out (closest to the centre first, ties by ascending position), so
//! balanced combinations of shorter terms come out early.
//!
//! Results are produced lazily by [`Combinations`]; stop pulling to cancel.
//!
//! ```
//! use major_system::index::ReverseIndex;
//! use major_system::search::{CombinationSearch, SearchConfig};
//!
//! let index = ReverseIndex::from_pairs([("71", "cat"), ("17", "dog")]);
//! let search = CombinationSearch::new(&index, SearchConfig::default());
//!
//! let found: Vec<String> = search
//!     .enumerate("7117")
//!     .unwrap()
//!     .map(|decoding| decoding.to_string())
//!     .collect();
//! assert_eq!(found, vec!["cat dog"]);
//! ```

use std::fmt;
use std::slice;
use std::sync::Arc;
use std::vec;

use ahash::AHashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MajorError, Result};
use crate::index::ReverseIndex;

/// Sentinel for substrings that no combination of terms can spell.
const UNREACHABLE: usize = usize::MAX;

/// Configuration for combination searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of terms in one combination (`None` for no limit).
    pub max_terms: Option<usize>,
    /// Longest digit string accepted.
    pub max_digits: usize,
    /// Skip combinations already produced through another split.
    pub unique: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_terms: None,
            max_digits: 64,
            unique: false,
        }
    }
}

impl SearchConfig {
    /// Limit the number of terms per combination.
    pub fn max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = Some(max_terms);
        self
    }

    /// Set the longest accepted digit string.
    pub fn max_digits(mut self, max_digits: usize) -> Self {
        self.max_digits = max_digits;
        self
    }

    /// Suppress repeated combinations.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }
}

/// One way of spelling a digit string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Decoding<'a> {
    /// A single term encoding the whole string.
    Term(&'a str),
    /// Several terms whose encodings concatenate to the string.
    Combination(Vec<&'a str>),
}

impl<'a> Decoding<'a> {
    fn from_terms(mut terms: Vec<&'a str>) -> Self {
        if terms.len() == 1 {
            Decoding::Term(terms.remove(0))
        } else {
            Decoding::Combination(terms)
        }
    }

    /// The terms, left to right.
    pub fn terms(&self) -> &[&'a str] {
        match self {
            Decoding::Term(term) => slice::from_ref(term),
            Decoding::Combination(terms) => terms,
        }
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms().len()
    }

    /// Always false; every decoding holds at least one term.
    pub fn is_empty(&self) -> bool {
        self.terms().is_empty()
    }

    /// Whether this decoding uses more than one term.
    pub fn is_combination(&self) -> bool {
        matches!(self, Decoding::Combination(_))
    }

    /// Copy the terms out.
    pub fn to_owned_terms(&self) -> Vec<String> {
        self.terms().iter().map(|t| t.to_string()).collect()
    }
}

impl fmt::Display for Decoding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.terms().join(" "))
    }
}

/// Interior split points of a string of `len` digits, middle-out.
///
/// Points are ordered by distance from `len / 2`; equal distances keep
/// ascending order. `split_points(4)` is `[2, 1, 3]`.
pub fn split_points(len: usize) -> Vec<usize> {
    let mut points: Vec<usize> = (1..len).collect();
    points.sort_by_key(|&i| (2 * i).abs_diff(len));
    points
}

/// Validate a digit string query.
pub fn validate_digits(digits: &str) -> Result<()> {
    match digits.chars().find(|c| !c.is_ascii_digit()) {
        Some(c) => Err(MajorError::invalid_input(format!(
            "{digits:?} contains non-digit character {c:?}"
        ))),
        None => Ok(()),
    }
}

/// Runs combination searches against a reverse index.
#[derive(Debug, Clone)]
pub struct CombinationSearch<'a> {
    index: &'a ReverseIndex,
    config: SearchConfig,
}

impl<'a> CombinationSearch<'a> {
    /// Create a new search over `index`.
    pub fn new(index: &'a ReverseIndex, config: SearchConfig) -> Self {
        CombinationSearch { index, config }
    }

    /// The search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Lazily enumerate every term and combination of terms spelling `digits`.
    ///
    /// Fails on non-digit characters, on queries longer than
    /// `max_digits`, and on a zero `max_terms`. An empty query yields nothing.
    pub fn enumerate(&self, digits: &str) -> Result<Combinations<'a>> {
        validate_digits(digits)?;
        if digits.len() > self.config.max_digits {
            return Err(MajorError::invalid_input(format!(
                "digit string has {} digits, the limit is {}",
                digits.len(),
                self.config.max_digits
            )));
        }
        let budget = match self.config.max_terms {
            Some(0) => return Err(MajorError::config("max_terms must be at least 1")),
            Some(n) => n,
            None => UNREACHABLE,
        };

        let plan = Arc::new(SearchPlan::new(self.index, digits));
        debug!(
            "decoding {digits:?}: needs at least {} terms, budget {:?}",
            plan.describe_min_terms(),
            self.config.max_terms
        );

        let root = Node::new(plan, 0, digits.len(), budget);
        Ok(Combinations {
            root,
            seen: self.config.unique.then(AHashSet::new),
        })
    }
}

/// Per-query table of the fewest terms needed to spell each substring.
struct SearchPlan<'a> {
    index: &'a ReverseIndex,
    digits: String,
    min_terms: Vec<usize>,
}

impl<'a> SearchPlan<'a> {
    fn new(index: &'a ReverseIndex, digits: &str) -> Self {
        let n = digits.len();
        let width = n + 1;
        let mut min_terms = vec![UNREACHABLE; width * width];

        for len in 1..=n {
            for start in 0..=(n - len) {
                let end = start + len;
                let fewest = if index.contains(&digits[start..end]) {
                    1
                } else {
                    (start + 1..end)
                        .map(|mid| {
                            min_terms[start * width + mid]
                                .saturating_add(min_terms[mid * width + end])
                        })
                        .min()
                        .unwrap_or(UNREACHABLE)
                };
                min_terms[start * width + end] = fewest;
            }
        }

        SearchPlan {
            index,
            digits: digits.to_string(),
            min_terms,
        }
    }

    fn min_terms(&self, start: usize, end: usize) -> usize {
        self.min_terms[start * (self.digits.len() + 1) + end]
    }

    fn terms(&self, start: usize, end: usize) -> &'a [String] {
        let index: &'a ReverseIndex = self.index;
        index.terms_for(&self.digits[start..end])
    }

    fn describe_min_terms(&self) -> String {
        match self.min_terms(0, self.digits.len()) {
            UNREACHABLE => "unreachable".to_string(),
            n => n.to_string(),
        }
    }
}

/// Enumerates the decodings of `digits[start..end]` using at most `budget`
/// terms.
struct Node<'a> {
    plan: Arc<SearchPlan<'a>>,
    start: usize,
    end: usize,
    budget: usize,
    direct: slice::Iter<'a, String>,
    splits: vec::IntoIter<usize>,
    product: Option<Box<Product<'a>>>,
}

impl<'a> Node<'a> {
    fn new(plan: Arc<SearchPlan<'a>>, start: usize, end: usize, budget: usize) -> Self {
        let len = end - start;
        let direct: &'a [String] = if len == 0 {
            &[]
        } else {
            plan.terms(start, end)
        };

        let splits: Vec<usize> = if budget >= 2 {
            split_points(len)
                .into_iter()
                .map(|point| start + point)
                .filter(|&mid| {
                    let needed = plan
                        .min_terms(start, mid)
                        .saturating_add(plan.min_terms(mid, end));
                    needed != UNREACHABLE && needed <= budget
                })
                .collect()
        } else {
            Vec::new()
        };

        Node {
            plan,
            start,
            end,
            budget,
            direct: direct.iter(),
            splits: splits.into_iter(),
            product: None,
        }
    }

    fn next_terms(&mut self) -> Option<Vec<&'a str>> {
        if let Some(term) = self.direct.next() {
            return Some(vec![term.as_str()]);
        }

        loop {
            if let Some(product) = self.product.as_mut() {
                if let Some(terms) = product.next_terms() {
                    return Some(terms);
                }
                self.product = None;
            }

            let mid = self.splits.next()?;
            self.product = Some(Box::new(Product::new(self, mid)));
        }
    }
}

/// Lazy Cartesian product of the decodings on either side of a split.
///
/// The suffix side is re-enumerated for every prefix decoding, so neither
/// side is ever materialized.
struct Product<'a> {
    plan: Arc<SearchPlan<'a>>,
    mid: usize,
    end: usize,
    budget: usize,
    prefixes: Node<'a>,
    current: Option<(Vec<&'a str>, Node<'a>)>,
}

impl<'a> Product<'a> {
    fn new(parent: &Node<'a>, mid: usize) -> Self {
        let plan = Arc::clone(&parent.plan);
        let prefixes = Node::new(Arc::clone(&plan), parent.start, mid, parent.budget - 1);
        Product {
            plan,
            mid,
            end: parent.end,
            budget: parent.budget,
            prefixes,
            current: None,
        }
    }

    fn next_terms(&mut self) -> Option<Vec<&'a str>> {
        loop {
            if let Some((prefix, suffixes)) = self.current.as_mut() {
                if let Some(suffix) = suffixes.next_terms() {
                    let mut terms = Vec::with_capacity(prefix.len() + suffix.len());
                    terms.extend_from_slice(prefix);
                    terms.extend(suffix);
                    return Some(terms);
                }
                self.current = None;
            }

            let prefix = self.prefixes.next_terms()?;
            let remaining = self.budget - prefix.len();
            if remaining == 0 || self.plan.min_terms(self.mid, self.end) > remaining {
                continue;
            }
            let suffixes = Node::new(Arc::clone(&self.plan), self.mid, self.end, remaining);
            self.current = Some((prefix, suffixes));
        }
    }
}

/// Lazy sequence of [`Decoding`]s returned by [`CombinationSearch::enumerate`].
pub struct Combinations<'a> {
    root: Node<'a>,
    seen: Option<AHashSet<Vec<&'a str>>>,
}

impl<'a> Iterator for Combinations<'a> {
    type Item = Decoding<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let terms = self.root.next_terms()?;
            if let Some(seen) = self.seen.as_mut()
                && !seen.insert(terms.clone())
            {
                continue;
            }
            return Some(Decoding::from_terms(terms));
        }
    }
}
