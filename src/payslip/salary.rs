use rust_decimal::{Decimal, RoundingStrategy};

/// Salary split coefficients applied at payslip generation time.
///
/// All monetary results are rounded to `scale` decimal places with
/// midpoint-away-from-zero rounding, so the persisted breakdown is exact
/// and re-computable.
#[derive(Debug, Clone)]
pub struct SalaryPolicy {
    pub basic_pct: Decimal,
    pub hra_pct: Decimal,
    pub flexi_pct: Decimal,
    /// PF is deducted from basic, not from gross.
    pub pf_pct: Decimal,
    pub professional_tax: Decimal,
    pub tax_credit_pct: Decimal,
    pub scale: u32,
}

impl Default for SalaryPolicy {
    fn default() -> Self {
        Self {
            basic_pct: Decimal::new(53, 2),  // 0.53
            hra_pct: Decimal::new(20, 2),    // 0.20
            flexi_pct: Decimal::new(27, 2),  // 0.27
            pf_pct: Decimal::new(12, 2),     // 0.12
            professional_tax: Decimal::new(200, 0),
            tax_credit_pct: Decimal::new(5, 2), // 0.05
            scale: 2,
        }
    }
}

/// Monthly breakdown for one employee. Pure output of
/// [`SalaryPolicy::compute`]; persistence happens elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryBreakdown {
    pub basic: Decimal,
    pub hra: Decimal,
    pub flexi: Decimal,
    pub gross_salary: Decimal,

    pub pf_deduction: Decimal,
    pub prof_tax_deduction: Decimal,
    pub total_deductions: Decimal,

    pub net_salary: Decimal,

    // Display fields carried onto the payslip as-is.
    pub balance: Decimal,
    pub aggrg_deduction: Decimal,
    pub inc_hd_salary: Decimal,
    pub tax_credit: Decimal,
}

impl SalaryPolicy {
    fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn compute(&self, salary: Decimal) -> SalaryBreakdown {
        let basic = self.round(salary * self.basic_pct);
        let hra = self.round(salary * self.hra_pct);
        let flexi = self.round(salary * self.flexi_pct);
        let gross_salary = basic + hra + flexi;

        let pf_deduction = self.round(basic * self.pf_pct);
        let prof_tax_deduction = self.professional_tax;
        let total_deductions = pf_deduction + prof_tax_deduction;

        let net_salary = gross_salary - total_deductions;

        SalaryBreakdown {
            basic,
            hra,
            flexi,
            gross_salary,
            pf_deduction,
            prof_tax_deduction,
            total_deductions,
            net_salary,
            balance: gross_salary,
            aggrg_deduction: total_deductions,
            inc_hd_salary: net_salary,
            tax_credit: self.round(net_salary * self.tax_credit_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn breakdown_for_fifty_thousand() {
        let b = SalaryPolicy::default().compute(dec("50000"));
        assert_eq!(b.basic, dec("26500"));
        assert_eq!(b.hra, dec("10000"));
        assert_eq!(b.flexi, dec("13500"));
        assert_eq!(b.gross_salary, dec("50000"));
        assert_eq!(b.pf_deduction, dec("3180"));
        assert_eq!(b.prof_tax_deduction, dec("200"));
        assert_eq!(b.total_deductions, dec("3380"));
        assert_eq!(b.net_salary, dec("46620"));
        assert_eq!(b.tax_credit, dec("2331"));
    }

    #[test]
    fn gross_is_the_sum_of_components() {
        let policy = SalaryPolicy::default();
        for salary in ["1", "123.45", "9999.99", "50000", "81234.56"] {
            let b = policy.compute(dec(salary));
            assert_eq!(b.gross_salary, b.basic + b.hra + b.flexi, "salary {}", salary);
            assert_eq!(
                b.net_salary,
                b.gross_salary - b.pf_deduction - b.prof_tax_deduction,
                "salary {}",
                salary
            );
        }
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        // 12.50 * 0.53 = 6.625 -> 6.63 under the documented policy
        let b = SalaryPolicy::default().compute(dec("12.50"));
        assert_eq!(b.basic, dec("6.63"));
    }

    #[test]
    fn display_fields_mirror_totals() {
        let b = SalaryPolicy::default().compute(dec("75000"));
        assert_eq!(b.balance, b.gross_salary);
        assert_eq!(b.aggrg_deduction, b.total_deductions);
        assert_eq!(b.inc_hd_salary, b.net_salary);
    }
}
