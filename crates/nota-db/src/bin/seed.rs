//! # Seed Data Generator
//!
//! Populates the database with a realistic catalog and a store profile
//! for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p nota-db --bin seed
//!
//! # Limit the catalog size
//! cargo run -p nota-db --bin seed -- --count 50
//!
//! # Specify database path
//! cargo run -p nota-db --bin seed -- --db ./data/nota.db
//! ```
//!
//! ## Generated Catalog
//! Office supplies and services typical of an institutional stationery
//! vendor:
//! - ATK (alat tulis kantor: pens, markers, staplers)
//! - KRT (paper stock)
//! - CTK (printing and binding services)
//! - ELK (small office electronics)
//!
//! Each item has a unique code `{CATEGORY}-{INDEX}` and a realistic
//! rupiah price.

use chrono::Utc;
use std::env;

use nota_core::{CatalogItem, StoreProfile, STORE_PROFILE_ID};
use nota_db::{Database, DbConfig};
use uuid::Uuid;

/// Catalog entries: (category, name, unit price in cents, is_service).
const CATALOG: &[(&str, &str, i64, bool)] = &[
    // ATK - alat tulis kantor
    ("ATK", "Pulpen Standard AE7 Hitam", 350_000, false),
    ("ATK", "Pulpen Pilot G2 Biru", 1_800_000, false),
    ("ATK", "Pensil 2B Faber-Castell", 450_000, false),
    ("ATK", "Spidol Whiteboard Snowman Hitam", 850_000, false),
    ("ATK", "Penghapus Whiteboard", 1_200_000, false),
    ("ATK", "Stapler Joyko HD-10", 1_500_000, false),
    ("ATK", "Isi Staples No. 10", 250_000, false),
    ("ATK", "Penggaris Besi 30cm", 700_000, false),
    ("ATK", "Gunting Kertas Sedang", 1_100_000, false),
    ("ATK", "Lem Stik Glukol", 400_000, false),
    ("ATK", "Stabilo Boss Kuning", 1_000_000, false),
    ("ATK", "Binder Clip 260", 600_000, false),
    ("ATK", "Map Plastik Kancing F4", 350_000, false),
    ("ATK", "Ordner Bantex F4", 2_500_000, false),
    ("ATK", "Buku Tulis 38 Lembar", 500_000, false),
    // KRT - kertas
    ("KRT", "Kertas HVS A4 70gsm (rim)", 5_500_000, false),
    ("KRT", "Kertas HVS A4 80gsm (rim)", 6_500_000, false),
    ("KRT", "Kertas HVS F4 70gsm (rim)", 6_000_000, false),
    ("KRT", "Kertas Buffalo A4 Warna", 3_500_000, false),
    ("KRT", "Amplop Putih Polos (box)", 2_000_000, false),
    ("KRT", "Kertas Continuous Form 4 Ply", 18_000_000, false),
    ("KRT", "Sticky Notes 76x76", 900_000, false),
    // ELK - elektronik kantor
    ("ELK", "Kalkulator Casio 12 Digit", 15_000_000, false),
    ("ELK", "Flashdisk 32GB", 6_500_000, false),
    ("ELK", "Baterai AA Alkaline (pak)", 2_500_000, false),
    ("ELK", "Mouse USB Logitech B100", 9_000_000, false),
    ("ELK", "Tinta Printer Epson 003 Hitam", 9_500_000, false),
    // CTK - jasa percetakan
    ("CTK", "Jasa Fotokopi A4 per Lembar", 30_000, true),
    ("CTK", "Jasa Jilid Spiral", 1_500_000, true),
    ("CTK", "Jasa Laminasi A4", 500_000, true),
    ("CTK", "Jasa Cetak Banner per m2", 4_500_000, true),
    ("CTK", "Jasa Cetak Kartu Nama (box)", 5_000_000, true),
    ("CTK", "Jasa Stempel Warna", 7_500_000, true),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = CATALOG.len();
    let mut db_path = String::from("./nota_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(CATALOG.len());
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Nota Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Max catalog items to insert (default: all)");
                println!("  -d, --db <PATH>    Database file path (default: ./nota_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Nota Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing catalog
    let existing = db.catalog().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} catalog items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Insert catalog
    println!();
    println!("Inserting catalog...");

    let now = Utc::now();
    let mut inserted = 0;
    let mut category_index: std::collections::HashMap<&str, usize> =
        std::collections::HashMap::new();

    for (category, name, price_cents, is_service) in CATALOG.iter().take(count) {
        let index = category_index.entry(*category).or_insert(0);
        *index += 1;

        let item = CatalogItem {
            id: Uuid::new_v4().to_string(),
            item_code: format!("{}-{:03}", category, index),
            item_name: name.to_string(),
            description: None,
            unit_price_cents: *price_cents,
            is_service: *is_service,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.catalog().insert(&item).await {
            eprintln!("Failed to insert {}: {}", item.item_code, e);
            continue;
        }

        inserted += 1;
    }

    println!("✓ Inserted {} catalog items", inserted);

    // Store profile
    println!();
    println!("Saving store profile...");

    let profile = StoreProfile {
        id: STORE_PROFILE_ID,
        store_name: "Toko Sumber Rejeki".to_string(),
        address: Some("Jl. Pahlawan No. 45".to_string()),
        city: Some("Semarang".to_string()),
        phone: Some("024-7601234".to_string()),
        email: Some("sumberrejeki@example.co.id".to_string()),
        npwp: Some("01.234.567.8-901.000".to_string()),
        owner_name: Some("Budi Santoso".to_string()),
        updated_at: now,
    };
    db.store_profile().upsert(&profile).await?;

    println!("✓ Store profile saved: {}", profile.store_name);

    // Quick verification
    println!();
    let results = db.catalog().search("kertas", 10).await?;
    println!("  Search 'kertas': {} results", results.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
