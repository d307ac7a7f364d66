use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of measure for a product row.
///
/// Mass units normalize to grams, volume units to milliliters, and `each`
/// passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Unit {
    #[default]
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "each")]
    Each,
}

impl Unit {
    /// Multiplier converting a quantity in this unit into the base unit
    /// (grams for mass, milliliters for volume, count for `each`).
    pub fn base_factor(&self) -> f64 {
        match self {
            Unit::Gram => 1.0,
            Unit::Kilogram => 1000.0,
            Unit::Milliliter => 1.0,
            Unit::Liter => 1000.0,
            Unit::Ounce => 28.3495,
            Unit::Pound => 453.592,
            Unit::Each => 1.0,
        }
    }

    /// The base unit this unit normalizes to, for display.
    pub fn base_label(&self) -> &'static str {
        match self {
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => "g",
            Unit::Milliliter | Unit::Liter => "ml",
            Unit::Each => "each",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Gram => write!(f, "g"),
            Unit::Kilogram => write!(f, "kg"),
            Unit::Milliliter => write!(f, "ml"),
            Unit::Liter => write!(f, "l"),
            Unit::Ounce => write!(f, "oz"),
            Unit::Pound => write!(f, "lb"),
            Unit::Each => write!(f, "each"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "g" => Ok(Unit::Gram),
            "kg" => Ok(Unit::Kilogram),
            "ml" => Ok(Unit::Milliliter),
            "l" => Ok(Unit::Liter),
            "oz" => Ok(Unit::Ounce),
            "lb" => Ok(Unit::Pound),
            "each" => Ok(Unit::Each),
            _ => Err(format!(
                "Invalid unit '{}'. Valid options: g, kg, ml, l, oz, lb, each",
                s
            )),
        }
    }
}

/// One row of the unit-price calculator.
///
/// `price` and `quantity` are kept as the raw user input; parsing happens at
/// calculation time so a half-typed row never errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Product {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub unit: Unit,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
        unit: Unit,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
            unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_display() {
        assert_eq!(format!("{}", Unit::Gram), "g");
        assert_eq!(format!("{}", Unit::Kilogram), "kg");
        assert_eq!(format!("{}", Unit::Each), "each");
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!(Unit::from_str("kg").unwrap(), Unit::Kilogram);
        assert_eq!(Unit::from_str("OZ").unwrap(), Unit::Ounce);
        assert_eq!(Unit::from_str("each").unwrap(), Unit::Each);
    }

    #[test]
    fn test_unit_from_str_invalid() {
        assert!(Unit::from_str("stone").is_err());
        assert!(Unit::from_str("").is_err());
    }

    #[test]
    fn test_unit_json_roundtrip() {
        let json = serde_json::to_string(&Unit::Pound).unwrap();
        assert_eq!(json, "\"lb\"");

        let parsed: Unit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Unit::Pound);
    }

    #[test]
    fn test_base_factor() {
        assert_eq!(Unit::Kilogram.base_factor(), 1000.0);
        assert_eq!(Unit::Liter.base_factor(), 1000.0);
        assert_eq!(Unit::Each.base_factor(), 1.0);
        assert!((Unit::Pound.base_factor() - 453.592).abs() < 1e-9);
    }

    #[test]
    fn test_product_json_roundtrip() {
        let product = Product::new("Milk", "3.49", "1", Unit::Liter);
        let json = serde_json::to_string(&product).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(product, parsed);
    }
}
