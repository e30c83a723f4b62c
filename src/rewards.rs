//! Earning projection for staking/yield pools.
//!
//! Pool statistics expose an annualized rate that is either a simple
//! APR or an already-compounded APY. Projections pro-rate that rate
//! over a compounding period: linearly for APR, geometrically for APY.

/// Projection window, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundingPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl CompoundingPeriod {
    pub const ALL: [CompoundingPeriod; 4] = [
        CompoundingPeriod::Daily,
        CompoundingPeriod::Weekly,
        CompoundingPeriod::Monthly,
        CompoundingPeriod::Yearly,
    ];

    pub fn days(self) -> f64 {
        match self {
            Self::Daily => 1.0,
            Self::Weekly => 7.0,
            Self::Monthly => 30.0,
            Self::Yearly => 365.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily earnings",
            Self::Weekly => "Weekly earnings",
            Self::Monthly => "Monthly earnings",
            Self::Yearly => "Yearly earnings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExpectedEarning {
    /// Annualized rate with daily compounding, in percent.
    pub apy: f64,
    /// Projected earning over the period, in display units of the
    /// staked token.
    pub reward_in_token: f64,
}

/// Project the earning of `amount` tokens over `period`, given an
/// annualized rate in percent. `rate_is_apy` tells whether the rate
/// already accounts for compounding.
pub fn calculate_reward(
    rate_percent: f64,
    amount: f64,
    period: CompoundingPeriod,
    rate_is_apy: bool,
) -> ExpectedEarning {
    if !(rate_percent > 0.0) || !(amount >= 0.0) {
        return ExpectedEarning::default();
    }

    let days = period.days();
    let rate = rate_percent / 100.0;

    if rate_is_apy {
        let period_ratio = (1.0 + rate).powf(days / 365.0) - 1.0;
        ExpectedEarning {
            apy: rate_percent,
            reward_in_token: period_ratio * amount,
        }
    } else {
        let apy = ((1.0 + rate / 365.0).powf(365.0) - 1.0) * 100.0;
        ExpectedEarning {
            apy,
            reward_in_token: rate * days / 365.0 * amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn apr_yearly_is_simple_interest() {
        let earning = calculate_reward(10.0, 100.0, CompoundingPeriod::Yearly, false);
        assert!(close(earning.reward_in_token, 10.0));
        // Daily compounding beats the simple rate.
        assert!(earning.apy > 10.0);
    }

    #[test]
    fn apr_pro_rates_linearly() {
        let daily = calculate_reward(36.5, 100.0, CompoundingPeriod::Daily, false);
        assert!(close(daily.reward_in_token, 0.1));

        let weekly = calculate_reward(36.5, 100.0, CompoundingPeriod::Weekly, false);
        assert!(close(weekly.reward_in_token, 0.7));
    }

    #[test]
    fn apy_compounds_geometrically() {
        let yearly = calculate_reward(10.0, 100.0, CompoundingPeriod::Yearly, true);
        assert!(close(yearly.reward_in_token, 10.0));
        assert!(close(yearly.apy, 10.0));

        // Over a shorter window the geometric ratio is below the linear
        // pro-rata of the same rate.
        let monthly = calculate_reward(10.0, 100.0, CompoundingPeriod::Monthly, true);
        assert!(monthly.reward_in_token < 10.0 * 30.0 / 365.0);
        assert!(monthly.reward_in_token > 0.0);
    }

    #[test]
    fn zero_or_negative_inputs_yield_nothing() {
        assert_eq!(
            calculate_reward(0.0, 100.0, CompoundingPeriod::Yearly, false),
            ExpectedEarning::default()
        );
        assert_eq!(
            calculate_reward(-5.0, 100.0, CompoundingPeriod::Yearly, true),
            ExpectedEarning::default()
        );
        assert_eq!(
            calculate_reward(10.0, f64::NAN, CompoundingPeriod::Yearly, false),
            ExpectedEarning::default()
        );
    }
}
