//! Unit-price normalization and best-value detection.
//!
//! Prices are normalized to a price per base unit (gram, milliliter, or item)
//! so rows with mixed units compare directly. A winner is only declared once
//! every row has a usable price and quantity.

use crate::models::Product;

/// Significant digits used when comparing unit prices, so binary rounding
/// noise does not split a genuine tie.
const COMPARE_SIG_DIGITS: usize = 6;

/// Parses a user-entered amount. Anything that is not a finite positive
/// number (empty, garbage, negative) comes back as 0.
pub fn parse_amount(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

impl Product {
    /// Price per base unit, or 0 when the row is incomplete.
    ///
    /// Always recomputed from the raw inputs; cached display values must
    /// never drift from this.
    pub fn unit_price(&self) -> f64 {
        let price = parse_amount(&self.price);
        let quantity = parse_amount(&self.quantity) * self.unit.base_factor();
        if quantity > 0.0 {
            price / quantity
        } else {
            0.0
        }
    }

    /// A row only enters best-value consideration once both price and
    /// quantity are filled in with positive numbers.
    pub fn is_eligible(&self) -> bool {
        parse_amount(&self.price) > 0.0 && parse_amount(&self.quantity) > 0.0
    }
}

/// Indices of the rows tied for the lowest unit price.
///
/// Empty unless there are at least two rows and every row is eligible; a
/// winner is never declared from incomplete data.
pub fn best_value_indices(products: &[Product]) -> Vec<usize> {
    if products.len() < 2 || !products.iter().all(Product::is_eligible) {
        return Vec::new();
    }

    let prices: Vec<f64> = products.iter().map(Product::unit_price).collect();
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let min_key = compare_key(min);

    // Decimal rounding is monotone, so the raw minimum's key is the lowest
    // key; every row sharing it is part of the tie.
    prices
        .iter()
        .enumerate()
        .filter(|(_, price)| compare_key(**price) == min_key)
        .map(|(i, _)| i)
        .collect()
}

/// Canonical decimal form of a price at [`COMPARE_SIG_DIGITS`] significant
/// digits. The formatter rounds in decimal and normalizes the mantissa, so
/// prices equal to six digits share one key even across power-of-ten
/// boundaries where a reconstructed float would diverge.
fn compare_key(value: f64) -> String {
    format!("{:.*e}", COMPARE_SIG_DIGITS - 1, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("3.49"), 3.49);
        assert_eq!(parse_amount(" 10 "), 10.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-5"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
    }

    #[test]
    fn test_unit_price_is_deterministic() {
        let product = Product::new("Oats", "2.50", "750", Unit::Gram);
        assert_eq!(product.unit_price(), product.unit_price());
    }

    #[test]
    fn test_unit_conversion_equivalence() {
        let in_kg = Product::new("A", "1", "1", Unit::Kilogram);
        let in_g = Product::new("B", "1", "1000", Unit::Gram);
        assert_eq!(in_kg.unit_price(), in_g.unit_price());
        assert_eq!(in_kg.unit_price(), 0.001);

        let in_l = Product::new("C", "2", "1", Unit::Liter);
        let in_ml = Product::new("D", "2", "1000", Unit::Milliliter);
        assert_eq!(in_l.unit_price(), in_ml.unit_price());
    }

    #[test]
    fn test_unit_price_blank_quantity_is_zero() {
        let product = Product::new("Eggs", "4.00", "", Unit::Each);
        assert_eq!(product.unit_price(), 0.0);
        assert!(!product.is_eligible());
    }

    #[test]
    fn test_best_value_single_winner() {
        let products = vec![
            Product::new("A", "10", "1", Unit::Kilogram),
            Product::new("B", "8", "1", Unit::Kilogram),
            Product::new("C", "9", "1", Unit::Kilogram),
        ];
        assert_eq!(best_value_indices(&products), vec![1]);
    }

    #[test]
    fn test_best_value_tie_returns_all() {
        let products = vec![
            Product::new("A", "10", "1000", Unit::Gram),
            Product::new("B", "5", "500", Unit::Gram),
        ];
        assert_eq!(best_value_indices(&products), vec![0, 1]);
    }

    #[test]
    fn test_best_value_tie_across_units() {
        let products = vec![
            Product::new("A", "3", "1", Unit::Kilogram),
            Product::new("B", "3", "1000", Unit::Gram),
            Product::new("C", "4", "1", Unit::Kilogram),
        ];
        assert_eq!(best_value_indices(&products), vec![0, 1]);
    }

    #[test]
    fn test_best_value_float_noise_still_ties() {
        // 0.3/3 and 0.1/1 differ in the last binary digit but are the same
        // price to six significant digits.
        let products = vec![
            Product::new("A", "0.3", "3", Unit::Each),
            Product::new("B", "0.1", "1", Unit::Each),
        ];
        assert_eq!(best_value_indices(&products), vec![0, 1]);
    }

    #[test]
    fn test_incomplete_row_suppresses_winner() {
        let products = vec![
            Product::new("A", "10", "1000", Unit::Gram),
            Product::new("B", "", "", Unit::Gram),
        ];
        assert!(best_value_indices(&products).is_empty());
    }

    #[test]
    fn test_single_row_has_no_winner() {
        let products = vec![Product::new("A", "10", "1000", Unit::Gram)];
        assert!(best_value_indices(&products).is_empty());
    }

    #[test]
    fn test_empty_list_has_no_winner() {
        assert!(best_value_indices(&[]).is_empty());
    }

    #[test]
    fn test_mass_units_compare() {
        // 1 lb = 453.592 g, so $4.54 per lb is just over $0.01/g and loses to
        // $9 per kg.
        let products = vec![
            Product::new("A", "4.54", "1", Unit::Pound),
            Product::new("B", "9", "1", Unit::Kilogram),
        ];
        assert_eq!(best_value_indices(&products), vec![1]);
    }

    #[test]
    fn test_best_value_tie_at_power_of_ten_boundary() {
        // 0.7/7 lands one binary step below 0.1; still the same price per
        // item to six significant digits.
        let products = vec![
            Product::new("A", "0.7", "7", Unit::Each),
            Product::new("B", "0.1", "1", Unit::Each),
        ];
        assert_eq!(best_value_indices(&products), vec![0, 1]);
    }

    #[test]
    fn test_compare_key_absorbs_float_noise() {
        assert_eq!(compare_key(0.099_999_999_999_999_99), compare_key(0.1));
        assert_eq!(compare_key(0.3 / 3.0), compare_key(0.1));
        assert_ne!(compare_key(0.100_001), compare_key(0.1));
    }

    #[test]
    fn test_compare_key_carries_across_power_of_ten() {
        // 9.9999996e-3 rounds up to 1.00000e-2 at six significant digits.
        assert_eq!(compare_key(0.009_999_999_6), compare_key(0.01));
    }
}
