//! One-shot helper: bcrypt-hash the admin password for ADMIN_HASH_PASSWORD.

use bcrypt::{hash, DEFAULT_COST};
use std::env;

fn main() {
    let Some(password) = env::args().nth(1) else {
        eprintln!("Usage: cargo run --bin hash-password <PASSWORD>");
        std::process::exit(1);
    };

    match hash(&password, DEFAULT_COST) {
        Ok(hashed) => {
            println!("bcrypt cost: {}", DEFAULT_COST);
            println!();
            println!("# Add to .env (single quotes keep the '$' signs intact):");
            println!("ADMIN_HASH_PASSWORD='{}'", hashed);
        }
        Err(e) => {
            eprintln!("Error hashing password: {}", e);
            std::process::exit(1);
        }
    }
}
