use std::env;
use std::fs;
use std::path::Path;

/// Keys read through `option_env!` in `src/config.rs`.
const CONFIG_KEYS: &[&str] = &[
    "SIMPLE_STORAGE_ADDRESS",
    "NATIVE_SYMBOL",
    "NATIVE_DECIMALS",
    "TOAST_DURATION_MS",
    "RECEIPT_POLL_INTERVAL_MS",
    "LOG_LEVEL",
];

fn main() {
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // the real environment wins over .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found, using built-in defaults. Copy .env.example to .env to override.");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
}
