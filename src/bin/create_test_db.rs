use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use voucher_service::initialize_db;

/// A utility for creating a test database for the voucher server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// (voucher number, date, name, bank, cheque number, amount, category, month, year)
type SampleVoucher = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f64,
    &'static str,
    &'static str,
    &'static str,
);

const SAMPLE_VOUCHERS: [SampleVoucher; 5] = [
    ("V1", "2024-01-03", "City Council", "ANZ", "100201", 120.0, "Rates", "January", "2024"),
    ("V2", "2024-01-15", "Power Co", "ANZ", "100202", 86.4, "Utilities", "January", "2024"),
    ("V3", "2024-01-28", "J. Smith", "BNZ", "100203", 450.0, "Wages", "January", "2024"),
    ("V4", "2024-02-02", "Power Co", "ANZ", "100204", 91.15, "Utilities", "February", "2024"),
    ("V5", "2024-02-20", "Stationery Ltd", "Kiwibank", "100205", 23.5, "Supplies", "February", "2024"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'vouchers.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'vouchers.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample vouchers...");

    for voucher in SAMPLE_VOUCHERS {
        conn.execute(
            "INSERT INTO vouchers (voucherNumber, date, name, bank, chequeNumber, amount, category, month, year)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            voucher,
        )?;
    }

    println!("Success!");

    Ok(())
}
