use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Length of a day in milliseconds. Day deltas ignore daylight-saving shifts.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Two-digit years in `M/D/YY` due dates are placed in this century.
pub const TWO_DIGIT_YEAR_BASE: i32 = 2000;

/// Largest open balance magnitude accepted by the normalizer; anything
/// beyond it is treated as unreadable and counts as zero.
pub const MAX_ABS_BALANCE: Decimal = dec!(1000000000000000000);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Name of the default 0-30 / 31-60 / 61-90 / 91+ scheme.
pub const STANDARD_SCHEME: &str = "standard";

/// Name of the finer partition used by the escalation view.
pub const ESCALATION_SCHEME: &str = "escalation";

/// Preamble rows emitted at the top of the accounting report and CSV export.
pub const REPORT_PREAMBLE_ROWS: usize = 3;
