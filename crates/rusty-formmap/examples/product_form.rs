// Validate a product with garde, map it onto its form and print the form as JSON
//
// Run with: RUST_LOG=rusty_formmap=trace cargo run --example product_form

use std::time::Duration;

use anyhow::Context;
use chrono::{TimeZone, Utc};
use garde::Validate;
use rusty_formmap::{DomainRecord, FormRecord, InputField, MapOptions, Mapper, MapperConfig};
use serde::Serialize;

#[derive(Validate, DomainRecord)]
struct Product {
    #[garde(length(min = 3))]
    name: String,
    #[garde(length(max = 200))]
    description: String,
    #[garde(range(min = 0.01))]
    price: f64,
    #[garde(skip)]
    published: bool,
    #[garde(skip)]
    available_from: chrono::DateTime<Utc>,
    #[garde(skip)]
    lead_time: Duration,
    #[garde(length(max = 5))]
    tags: Vec<String>,
    #[garde(dive)]
    variants: Vec<Variant>,
}

#[derive(Validate, DomainRecord)]
struct Variant {
    #[garde(ascii, length(min = 1))]
    sku: String,
    #[garde(range(min = 0.01))]
    price: f64,
    #[garde(range(max = 10_000))]
    stock: u32,
}

#[derive(FormRecord, Default, Serialize)]
struct ProductForm {
    name: InputField,
    description: InputField,
    price: InputField,
    published: InputField,
    available_from: InputField,
    lead_time: InputField,
    tags: Vec<InputField>,
    variants: Vec<VariantForm>,
}

#[derive(FormRecord, Default, Serialize)]
struct VariantForm {
    sku: InputField,
    price: InputField,
    stock: InputField,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = MapperConfig::load_default().unwrap_or_else(|e| {
        eprintln!("Failed to load formmap.toml: {:#}", e);
        eprintln!("Using default configuration");
        MapperConfig::default()
    });

    let product = Product {
        name: "Mu".to_string(),
        description: "Hand-thrown stoneware mug".to_string(),
        price: 18.5,
        published: false,
        available_from: Utc
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .context("invalid launch date")?,
        lead_time: Duration::from_secs(90 * 60),
        tags: vec!["kitchen".to_string(), "ceramics".to_string()],
        variants: vec![
            Variant {
                sku: "MUG-BLUE".to_string(),
                price: 18.5,
                stock: 12,
            },
            Variant {
                sku: "MUG-RED".to_string(),
                price: 0.0,
                stock: 0,
            },
        ],
    };

    let errors = rusty_formmap::validation::garde::validate(&product);
    if let Some(err) = &errors {
        println!("{}", err);
    }

    let mut mapper = Mapper::with_config(config);
    mapper.register_field_converter("price", |v| {
        v.downcast_ref::<f64>()
            .map(|p| format!("{:.2}", p))
            .unwrap_or_default()
    });

    let options = MapOptions::new().skip("description");

    let mut form = ProductForm::default();
    mapper.map_with_options(&product, &errors, &mut form, &options)?;

    println!("{}", serde_json::to_string_pretty(&form)?);
    Ok(())
}
