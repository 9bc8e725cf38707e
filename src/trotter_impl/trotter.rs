//! Core Trotter error expansion

use crate::normal_order::CoefficientMap;
use crate::ordering::TrotterSeries;
use crate::term::{concatenate_three_terms, trivially_commutes, Term};
use itertools::iproduct;
use rayon::prelude::*;
use std::ops::{Add, AddAssign};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Counters collected during the expansion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Visited (a, b, c) positions of the series
    pub position_triples: u64,
    /// Concrete operator triples expanded into four products
    pub expanded: u64,
    /// Concrete operator triples skipped as trivially commuting
    pub pruned: u64,
}

impl Add for ExpansionStats {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl AddAssign for ExpansionStats {
    fn add_assign(&mut self, other: Self) {
        self.position_triples += other.position_triples;
        self.expanded += other.expanded;
        self.pruned += other.pruned;
    }
}

/// Normal-ordered error operator and the statistics of its expansion
#[derive(Debug, Clone, Default)]
pub struct ErrorExpansion {
    pub terms: CoefficientMap,
    pub stats: ExpansionStats,
}

/// Trotter error calculator over an ordered series
pub struct TrotterErrorCalculator<'a> {
    series: &'a TrotterSeries,
    parallel: bool,
    report_progress: bool,
}

impl<'a> TrotterErrorCalculator<'a> {
    pub fn new(series: &'a TrotterSeries) -> Self {
        Self {
            series,
            parallel: true,
            report_progress: false,
        }
    }

    /// Distribute the outer loop over the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Log percentage complete and remaining time
    pub fn with_progress(mut self, report_progress: bool) -> Self {
        self.report_progress = report_progress;
        self
    }

    /// Number of (a, b, c) positions visited: Σ_{i<n} i (i + 1)
    pub fn num_commutators(&self) -> u64 {
        (0..self.series.len() as u64).map(|i| i * (i + 1)).sum()
    }

    /// Expand every admissible commutator of the series.
    pub fn calculate_trotter_error(&self) -> ErrorExpansion {
        let num_commutators = self.num_commutators();
        info!("There are {} possible commutators.", num_commutators);
        let progress = Progress::new(num_commutators, self.report_progress);

        let num_terms = self.series.len();
        let (terms, stats) = if self.parallel {
            (1..num_terms)
                .into_par_iter()
                .fold(
                    || (CoefficientMap::new(), ExpansionStats::default()),
                    |(mut terms, mut stats), b| {
                        self.expand_outer(b, &mut terms, &mut stats);
                        progress.advance(outer_weight(b));
                        (terms, stats)
                    },
                )
                .reduce(
                    || (CoefficientMap::new(), ExpansionStats::default()),
                    |(mut terms, stats), (other_terms, other_stats)| {
                        terms.merge(other_terms);
                        (terms, stats + other_stats)
                    },
                )
        } else {
            let mut terms = CoefficientMap::new();
            let mut stats = ExpansionStats::default();
            for b in 1..num_terms {
                self.expand_outer(b, &mut terms, &mut stats);
                progress.advance(outer_weight(b));
            }
            (terms, stats)
        };

        info!(
            "Expanded {} operator triples, pruned {} trivially commuting triples",
            stats.expanded, stats.pruned
        );
        ErrorExpansion { terms, stats }
    }

    /// All commutators with position `b` as the outer operand B.
    fn expand_outer(&self, b: usize, terms: &mut CoefficientMap, stats: &mut ExpansionStats) {
        let b_entry = self.series.get_term_for_trotter(b);

        for a in 0..=b {
            let a_entry = self.series.get_term_for_trotter(a);

            for c in 0..b {
                let c_entry = self.series.get_term_for_trotter(c);
                stats.position_triples += 1;

                let scale = scale_factor(
                    a,
                    b,
                    a_entry.coefficient * b_entry.coefficient * c_entry.coefficient,
                );

                for (a_term, b_term, c_term) in
                    iproduct!(&a_entry.terms, &b_entry.terms, &c_entry.terms)
                {
                    if trivially_commutes(a_term, b_term, c_term) {
                        stats.pruned += 1;
                        continue;
                    }
                    stats.expanded += 1;
                    add_commutator_terms(terms, a_term, b_term, c_term, scale);
                }
            }
        }
    }
}

/// (1/12)(1 - δ_ab / 2) applied to the product of the three coefficients
pub fn scale_factor(a: usize, b: usize, multiplied_coeffs: f64) -> f64 {
    if a == b {
        multiplied_coeffs / 24.0
    } else {
        multiplied_coeffs / 12.0
    }
}

/// Accumulate scale * [A, [B, C]] = scale * (ABC - ACB - BCA + CBA).
pub fn add_commutator_terms(
    terms: &mut CoefficientMap,
    a_term: &Term,
    b_term: &Term,
    c_term: &Term,
    scale: f64,
) {
    terms.add_normal_form(concatenate_three_terms(a_term, b_term, c_term), scale);
    terms.add_normal_form(concatenate_three_terms(a_term, c_term, b_term), -scale);
    terms.add_normal_form(concatenate_three_terms(b_term, c_term, a_term), -scale);
    terms.add_normal_form(concatenate_three_terms(c_term, b_term, a_term), scale);
}

/// Position triples visited for outer index b
fn outer_weight(b: usize) -> u64 {
    let b = b as u64;
    b * (b + 1)
}

struct Progress {
    enabled: bool,
    total: u64,
    done: AtomicU64,
    last_percent: AtomicU64,
    start: Instant,
}

impl Progress {
    fn new(total: u64, enabled: bool) -> Self {
        Self {
            enabled,
            total,
            done: AtomicU64::new(0),
            last_percent: AtomicU64::new(0),
            start: Instant::now(),
        }
    }

    fn advance(&self, count: u64) {
        if !self.enabled || self.total == 0 {
            return;
        }
        let done = self.done.fetch_add(count, Ordering::Relaxed) + count;
        let percent = done * 100 / self.total;
        let previous = self.last_percent.fetch_max(percent, Ordering::Relaxed);
        if percent <= previous {
            return;
        }

        let elapsed = self.start.elapsed().as_secs_f64();
        let remaining = elapsed / percent as f64 * (100 - percent) as f64;
        info!(
            "Computation {}% complete. Approximately {} minute(s) remaining.",
            percent,
            (remaining / 60.0) as u64
        );
    }
}
