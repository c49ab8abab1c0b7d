//! Build script for the Coldtify relay.
//!
//! Copies the `.env.example` configuration template from the crate root to the
//! user's local data directory, next to where [`config::load_env`] looks for
//! the real `.env` file:
//! - Linux: `~/.local/share/coldtify/.env.example`
//! - macOS: `~/Library/Application Support/coldtify/.env.example`
//! - Windows: `%LOCALAPPDATA%/coldtify/.env.example`
//!
//! A missing template or an unwritable data directory only produces a cargo
//! warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("coldtify");

    if env_example_path.is_file() {
        let copied = fs::create_dir_all(&out_dir)
            .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")));
        if let Err(e) = copied {
            println!("cargo:warning=could not copy .env.example: {}", e);
        }
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
