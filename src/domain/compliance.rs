//! Withdrawal fee compliance between the target and source venues.
//!
//! The target venue must never charge less, or allow smaller withdrawals,
//! than the source venue it settles through. Each source network is checked
//! on its own.

use rust_decimal::Decimal;
use serde::Serialize;

use super::currency::{index_by_code, NetworkRecord, SourceCurrency, TargetCurrency};

/// Outcome of comparing one target currency against one source network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub currency: String,
    pub network: String,
    pub target_min_withdraw: Decimal,
    pub source_min_withdraw: Decimal,
    pub target_withdraw_fee: Decimal,
    pub source_withdraw_fee: Decimal,
    /// Target minimum withdrawal is at least the source network's.
    pub min_withdraw_ok: bool,
    /// Target withdrawal fee is at least the source network's.
    pub withdraw_fee_ok: bool,
}

impl ComplianceReport {
    #[must_use]
    pub const fn is_compliant(&self) -> bool {
        self.min_withdraw_ok && self.withdraw_fee_ok
    }
}

/// Compliance of one target currency across all its source networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CurrencyCompliance {
    /// The source venue does not list the currency.
    AbsentAtSource { code: String },
    /// One report per source network, in source order.
    Checked {
        code: String,
        reports: Vec<ComplianceReport>,
    },
}

impl CurrencyCompliance {
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::AbsentAtSource { code } | Self::Checked { code, .. } => code,
        }
    }
}

/// Compare a target currency with one source network.
#[must_use]
pub fn check_compliance(target: &TargetCurrency, network: &NetworkRecord) -> ComplianceReport {
    ComplianceReport {
        currency: target.source_code(),
        network: network.name.clone(),
        target_min_withdraw: target.min_withdraw,
        source_min_withdraw: network.withdraw_min,
        target_withdraw_fee: target.withdraw_fee,
        source_withdraw_fee: network.withdraw_fee,
        min_withdraw_ok: target.min_withdraw >= network.withdraw_min,
        withdraw_fee_ok: target.withdraw_fee >= network.withdraw_fee,
    }
}

/// Check a target currency against its source counterpart, if any.
#[must_use]
pub fn check_currency(
    target: &TargetCurrency,
    source: Option<&SourceCurrency>,
) -> CurrencyCompliance {
    match source {
        None => CurrencyCompliance::AbsentAtSource {
            code: target.source_code(),
        },
        Some(source) => CurrencyCompliance::Checked {
            code: target.source_code(),
            reports: source
                .networks
                .iter()
                .map(|network| check_compliance(target, network))
                .collect(),
        },
    }
}

/// Check every target currency, in target order.
#[must_use]
pub fn audit_fees(
    targets: &[TargetCurrency],
    sources: &[SourceCurrency],
) -> Vec<CurrencyCompliance> {
    let index = index_by_code(sources);
    targets
        .iter()
        .map(|target| check_currency(target, index.get(target.source_code().as_str()).copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usdt() -> SourceCurrency {
        SourceCurrency::new(
            "USDT",
            vec![
                NetworkRecord::new("ETH", dec!(3.2), dec!(10)),
                NetworkRecord::new("TRX", dec!(1), dec!(10)),
            ],
        )
    }

    #[test]
    fn passes_when_target_is_at_least_source() {
        let target = TargetCurrency::new("usdt", dec!(1), dec!(10));
        let report = check_compliance(&target, &NetworkRecord::new("TRX", dec!(1.0), dec!(10)));

        assert!(report.min_withdraw_ok);
        assert!(report.withdraw_fee_ok);
        assert!(report.is_compliant());
        assert_eq!(report.currency, "USDT");
        assert_eq!(report.network, "TRX");
    }

    #[test]
    fn each_comparison_fails_independently() {
        let target = TargetCurrency::new("usdt", dec!(5), dec!(1));
        let report = check_compliance(&target, &NetworkRecord::new("ETH", dec!(3.2), dec!(10)));

        assert!(!report.min_withdraw_ok);
        assert!(report.withdraw_fee_ok);
        assert!(!report.is_compliant());
        assert_eq!(report.target_min_withdraw, dec!(1));
        assert_eq!(report.source_min_withdraw, dec!(10));
        assert_eq!(report.target_withdraw_fee, dec!(5));
        assert_eq!(report.source_withdraw_fee, dec!(3.2));
    }

    #[test]
    fn one_report_per_network() {
        let target = TargetCurrency::new("usdt", dec!(2), dec!(20));
        let source = usdt();

        let CurrencyCompliance::Checked { code, reports } = check_currency(&target, Some(&source))
        else {
            panic!("expected a checked currency");
        };

        assert_eq!(code, "USDT");
        assert_eq!(reports.len(), 2);
        assert!(!reports[0].withdraw_fee_ok);
        assert!(reports[1].withdraw_fee_ok);
    }

    #[test]
    fn absent_currency_produces_no_reports() {
        let target = TargetCurrency::new("xyz", dec!(1), dec!(1));
        assert_eq!(
            check_currency(&target, None),
            CurrencyCompliance::AbsentAtSource { code: "XYZ".into() }
        );
    }

    #[test]
    fn audit_matches_codes_case_insensitively_from_target() {
        let targets = vec![
            TargetCurrency::new("usdt", dec!(5), dec!(20)),
            TargetCurrency::new("doge", dec!(5), dec!(20)),
        ];
        let sources = vec![usdt()];

        let results = audit_fees(&targets, &sources);

        assert_eq!(results.len(), 2);
        assert!(matches!(
            &results[0],
            CurrencyCompliance::Checked { reports, .. } if reports.len() == 2
        ));
        assert_eq!(results[1].code(), "DOGE");
        assert!(matches!(results[1], CurrencyCompliance::AbsentAtSource { .. }));
    }
}
