use clap::{Args, Subcommand};
use serde::Serialize;

use decide_core::{
    best_value_indices, KeyValueStore, Product, SavedData, SavedItemRepository, Unit,
    UnitPriceState,
};

use super::OutputFormat;

#[derive(Args)]
pub struct UnitPriceCommand {
    #[command(subcommand)]
    pub command: UnitPriceSubcommand,
}

#[derive(Subcommand)]
pub enum UnitPriceSubcommand {
    /// Compare products by normalized unit price
    Compare {
        /// Product as NAME:PRICE:QUANTITY:UNIT (can be repeated)
        #[arg(long = "product", value_name = "NAME:PRICE:QTY:UNIT", required = true)]
        products: Vec<String>,

        /// Save the comparison under this name
        #[arg(long, value_name = "NAME")]
        save: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Serialize)]
struct CompareRow {
    name: String,
    price: String,
    quantity: String,
    unit: String,
    unit_price: f64,
    best: bool,
}

impl UnitPriceCommand {
    pub async fn run<S: KeyValueStore>(
        &self,
        repo: &SavedItemRepository<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            UnitPriceSubcommand::Compare {
                products,
                save,
                format,
            } => {
                let products = products
                    .iter()
                    .map(|raw| parse_product_arg(raw))
                    .collect::<Result<Vec<_>, _>>()?;

                let best = best_value_indices(&products);

                let rows: Vec<CompareRow> = products
                    .iter()
                    .enumerate()
                    .map(|(i, p)| CompareRow {
                        name: p.name.clone(),
                        price: p.price.clone(),
                        quantity: p.quantity.clone(),
                        unit: p.unit.to_string(),
                        unit_price: p.unit_price(),
                        best: best.contains(&i),
                    })
                    .collect();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&rows)?);
                    }
                    OutputFormat::Text => {
                        for (row, product) in rows.iter().zip(&products) {
                            let marker = if row.best { "  <- best value" } else { "" };
                            println!(
                                "{}: {} for {} {} = {:.4}/{}{}",
                                row.name,
                                row.price,
                                row.quantity,
                                row.unit,
                                row.unit_price,
                                product.unit.base_label(),
                                marker
                            );
                        }
                        if best.is_empty() && products.len() > 1 {
                            println!("(no best value: fill in price and quantity for every product)");
                        }
                    }
                }

                if let Some(name) = save {
                    let data = SavedData::UnitPrice(UnitPriceState { products });
                    let category = data.category();
                    let saved = repo.save(category, name, data, false).await?;
                    println!("Saved as '{}'", saved.name);
                }

                Ok(())
            }
        }
    }
}

/// Parses `NAME:PRICE:QUANTITY:UNIT`. The last three fields must not contain
/// colons; the name may.
fn parse_product_arg(raw: &str) -> Result<Product, String> {
    let mut fields = raw.rsplitn(4, ':');
    let unit = fields.next();
    let quantity = fields.next();
    let price = fields.next();
    let name = fields.next();

    match (name, price, quantity, unit) {
        (Some(name), Some(price), Some(quantity), Some(unit)) => {
            let unit: Unit = unit.parse()?;
            Ok(Product::new(name, price, quantity, unit))
        }
        _ => Err(format!(
            "Invalid product '{}'. Expected NAME:PRICE:QUANTITY:UNIT, e.g. rice:4.99:2:kg",
            raw
        )),
    }
}
