use super::Metric;
use crate::weights::Criterion;

pub(super) fn metrics() -> Vec<Metric> {
    vec![
        Metric::placeholder(Criterion::Centralization),
        Metric::placeholder(Criterion::Tactics),
    ]
}
