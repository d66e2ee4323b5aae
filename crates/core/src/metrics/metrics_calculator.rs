use rust_decimal::Decimal;

use super::metrics_model::MetricSnapshot;
use crate::receivables::Receivable;

/// Running count and balance of a record subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub count: usize,
    pub balance: Decimal,
}

impl Tally {
    pub fn over<'a>(records: impl IntoIterator<Item = &'a Receivable>) -> Self {
        records.into_iter().fold(Tally::default(), |tally, record| Tally {
            count: tally.count + 1,
            balance: tally
                .balance
                .saturating_add(record.normalized_open_balance()),
        })
    }

    /// Snapshot of this subset relative to `total`.
    ///
    /// A zero denominator yields a zero percentage.
    pub fn snapshot_against(&self, total: &Tally) -> MetricSnapshot {
        let percent_of_total_count = if total.count == 0 {
            Decimal::ZERO
        } else {
            percent_of(Decimal::from(self.count), Decimal::from(total.count))
        };
        let percent_of_total_balance = percent_of(self.balance, total.balance);

        MetricSnapshot {
            record_count: self.count,
            summed_balance: self.balance,
            percent_of_total_count,
            percent_of_total_balance,
        }
    }
}

/// `part` as a percentage of `whole`; zero when `whole` is zero or the
/// ratio cannot be represented.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .or_else(|| {
            part.checked_div(whole)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or(Decimal::ZERO)
}

/// Aggregates the records matching `predicate` against the whole collection.
///
/// A pure fold: the input is not modified and the result only depends on
/// which records match, not on their order.
pub fn aggregate<F>(records: &[Receivable], predicate: F) -> MetricSnapshot
where
    F: Fn(&Receivable) -> bool,
{
    let total = Tally::over(records);
    let subset = Tally::over(records.iter().filter(|record| predicate(*record)));
    subset.snapshot_against(&total)
}

/// Aggregates the whole collection against itself.
pub fn aggregate_all(records: &[Receivable]) -> MetricSnapshot {
    aggregate(records, |_| true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::BalanceValue;
    use rust_decimal_macros::dec;

    fn record(id: &str, balance: &str) -> Receivable {
        let mut r = Receivable::new(id, "Customer", "6/1/25".into());
        r.open_balance = Some(BalanceValue::Text(balance.to_string()));
        r
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        let snapshot = aggregate_all(&[]);
        assert_eq!(snapshot, MetricSnapshot::default());
        assert_eq!(snapshot.record_count, 0);
        assert_eq!(snapshot.summed_balance, Decimal::ZERO);
        assert_eq!(snapshot.percent_of_total_count, Decimal::ZERO);
        assert_eq!(snapshot.percent_of_total_balance, Decimal::ZERO);
    }

    #[test]
    fn test_predicate_subset_and_percentages() {
        let records = vec![
            record("a", "100.00"),
            record("b", "300.00"),
            record("c", "600.00"),
            record("d", "1,000.00"),
        ];
        let snapshot = aggregate(&records, |r| r.id == "b" || r.id == "c");
        assert_eq!(snapshot.record_count, 2);
        assert_eq!(snapshot.summed_balance, dec!(900));
        assert_eq!(snapshot.percent_of_total_count, dec!(50));
        assert_eq!(snapshot.percent_of_total_balance, dec!(45));
    }

    #[test]
    fn test_zero_total_balance_gives_zero_percent() {
        let records = vec![record("a", "0"), record("b", "")];
        let snapshot = aggregate(&records, |r| r.id == "a");
        assert_eq!(snapshot.record_count, 1);
        assert_eq!(snapshot.percent_of_total_count, dec!(50));
        assert_eq!(snapshot.percent_of_total_balance, Decimal::ZERO);
    }

    #[test]
    fn test_unparseable_balances_count_as_zero() {
        let records = vec![record("a", "abc"), record("b", "250")];
        let snapshot = aggregate_all(&records);
        assert_eq!(snapshot.record_count, 2);
        assert_eq!(snapshot.summed_balance, dec!(250));
        assert_eq!(snapshot.percent_of_total_balance, dec!(100));
    }

    #[test]
    fn test_huge_balances_do_not_overflow() {
        let records = vec![
            record("a", "50000000000000000000000000000"),
            record("b", "50000000000000000000000000000"),
            record("c", "12.50"),
        ];
        let snapshot = aggregate(&records, |r| r.id != "c");
        assert_eq!(snapshot.record_count, 2);
        assert_eq!(snapshot.summed_balance, Decimal::ZERO);
        assert_eq!(snapshot.percent_of_total_balance, Decimal::ZERO);
    }

    #[test]
    fn test_tally_saturates_instead_of_panicking() {
        let near_max = Tally {
            count: 1,
            balance: Decimal::MAX,
        };
        assert_eq!(near_max.snapshot_against(&near_max).percent_of_total_balance, dec!(100));

        let doubled = Tally {
            count: 2,
            balance: Decimal::MAX.saturating_add(Decimal::MAX),
        };
        assert_eq!(doubled.balance, Decimal::MAX);
        assert_eq!(percent_of(Decimal::MAX, dec!(0.5)), Decimal::ZERO);
    }

    #[test]
    fn test_aggregate_is_idempotent_and_leaves_input_untouched() {
        let records = vec![record("a", "10.10"), record("b", "-3.05"), record("c", "7")];
        let before = records.clone();
        let first = aggregate(&records, |r| r.id != "c");
        let second = aggregate(&records, |r| r.id != "c");
        assert_eq!(first, second);
        assert_eq!(records, before);
        assert_eq!(first.summed_balance, dec!(7.05));
    }
}
