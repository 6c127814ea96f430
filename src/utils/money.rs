//! Peso amount helpers.
//!
//! Pay amounts are plain f64 pesos; every derived rate and every pay
//! component is rounded to centavos with [`round2`] as soon as it is
//! computed, so stored values and displayed values never disagree.

/// Round to 2 decimal places (centavos), ties away from zero.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Format an amount with two decimals, e.g. "412.50".
pub fn fmt_peso(amount: f64) -> String {
    format!("{:.2}", amount)
}
