use dotenv::dotenv;
use std::env;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use toml::Value;

const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;

/// Writes `APP_METADATA_*` constants into `$OUT_DIR/app_metadata.rs`.
struct AppMetadata {
    file: File,
}

impl AppMetadata {
    fn create() -> io::Result<Self> {
        let out_dir = env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
        let file = File::create(Path::new(&out_dir).join("app_metadata.rs"))?;
        Ok(Self { file })
    }

    fn write_str(&mut self, key: &str, value: &str) -> io::Result<()> {
        writeln!(self.file, "#[allow(unused)]\npub const APP_METADATA_{}: &str = {:?};", key.to_uppercase(), value)
    }

    fn write_bytes(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        let bytes: Vec<String> = value.iter().map(|b| b.to_string()).collect();
        writeln!(
            self.file,
            "#[allow(unused)]\npub const APP_METADATA_{}: &[u8; {}] = &[{}];",
            key.to_uppercase(),
            value.len(),
            bytes.join(", ")
        )
    }
}

/// Pads or truncates `seed` to exactly `len` bytes.
fn fixed_len(seed: String, len: usize) -> Vec<u8> {
    let mut bytes = seed.into_bytes();
    bytes.resize(len, b'!');
    bytes
}

fn token_keys(package_name: &str) -> (Vec<u8>, Vec<u8>) {
    match (env::var("PUNCHCLOCK_TOKEN_KEY"), env::var("PUNCHCLOCK_TOKEN_IV")) {
        (Ok(key), Ok(iv)) => {
            if key.len() != KEY_LEN {
                panic!("PUNCHCLOCK_TOKEN_KEY must be exactly {} bytes long, got {}", KEY_LEN, key.len());
            }
            if iv.len() != IV_LEN {
                panic!("PUNCHCLOCK_TOKEN_IV must be exactly {} bytes long, got {}", IV_LEN, iv.len());
            }
            (key.into_bytes(), iv.into_bytes())
        }
        _ => {
            println!("cargo:warning=PUNCHCLOCK_TOKEN_KEY or PUNCHCLOCK_TOKEN_IV not set, using package-derived keys.");
            println!("cargo:warning=For production builds put both into a .env file next to Cargo.toml.");
            (
                fixed_len(format!("{}_token_store_key", package_name), KEY_LEN),
                fixed_len(format!("{}_token_iv", package_name), IV_LEN),
            )
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenv();
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=PUNCHCLOCK_TOKEN_KEY");
    println!("cargo:rerun-if-env-changed=PUNCHCLOCK_TOKEN_IV");

    let package_name = env::var("CARGO_PKG_NAME").unwrap_or_else(|_| "punchclock".to_string());
    let mut metadata = AppMetadata::create()?;
    metadata.write_str("NAME", &package_name)?;
    metadata.write_str("VERSION", &env::var("CARGO_PKG_VERSION").unwrap_or_default())?;

    let manifest = fs::read_to_string("Cargo.toml")?;
    let manifest: Value = toml::from_str(&manifest).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if let Some(table) = manifest.get("package").and_then(|p| p.get("metadata")).and_then(|m| m.as_table()) {
        for (key, value) in table {
            if let Some(value) = value.as_str() {
                metadata.write_str(key, value)?;
            }
        }
    }

    let (key, iv) = token_keys(&package_name);
    metadata.write_bytes("TOKEN_KEY", &key)?;
    metadata.write_bytes("TOKEN_IV", &iv)?;

    Ok(())
}
