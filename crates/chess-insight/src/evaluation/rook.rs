use super::Metric;
use crate::weights::Criterion;

// File and battery detection are not implemented yet.
pub(super) fn metrics() -> Vec<Metric> {
    vec![
        Metric::placeholder(Criterion::OpenFiles),
        Metric::placeholder(Criterion::Tactics),
    ]
}
