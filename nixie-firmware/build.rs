//! Build script for nixie-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates clock.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section, with their expected type
const SWEEP_KEYS: &[(&str, Kind)] = &[
    ("interval_s", Kind::Integer),
    ("duration_s", Kind::Integer),
    ("advance_ticks", Kind::Integer),
];

const CLOCK_KEYS: &[(&str, Kind)] = &[
    ("hour_mode", Kind::String),
    ("time_format", Kind::String),
    ("poll_interval_ms", Kind::Integer),
];

const DISPLAY_KEYS: &[(&str, Kind)] = &[
    ("variant", Kind::String),
    ("spi_frequency_hz", Kind::Integer),
    ("high_voltage_on_boot", Kind::Boolean),
];

// Limits mirror nixie_core::config
const MAX_POLL_INTERVAL_MS: i64 = 1000;
const MAX_SPI_FREQUENCY_HZ: i64 = 1_000_000;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Integer,
    String,
    Boolean,
}

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate clock.toml at compile time
///
/// The firmware parses the same file again at boot with its own minimal
/// parser; catching mistakes here keeps a bad file from ever reaching the
/// board.
fn validate_config() {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a clock.toml configuration file.          ║\n\
            ║  Please create one in the nixie-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in clock.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_sweep(&config, &mut errors);
    validate_clock(&config, &mut errors);
    validate_display(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in clock.toml                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=clock.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only known sections, each holding only known keys of the right type
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("Top level must be a table".to_string());
        return;
    };

    for (name, section) in root {
        let keys = match name.as_str() {
            "sweep" => SWEEP_KEYS,
            "clock" => CLOCK_KEYS,
            "display" => DISPLAY_KEYS,
            _ => {
                errors.push(format!("Unknown section [{}]", name));
                continue;
            }
        };

        let Some(table) = section.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };

        for (key, value) in table {
            match keys.iter().find(|(k, _)| *k == key.as_str()) {
                None => errors.push(format!("[{}] unknown key '{}'", name, key)),
                Some((_, kind)) => {
                    let ok = match kind {
                        Kind::Integer => value.is_integer(),
                        Kind::String => value.is_str(),
                        Kind::Boolean => value.is_bool(),
                    };
                    if !ok {
                        errors.push(format!("[{}] '{}' has the wrong type", name, key));
                    }
                }
            }
        }
    }
}

fn integer(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn string<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a str> {
    config.get(section)?.get(key)?.as_str()
}

fn validate_sweep(config: &toml::Value, errors: &mut Vec<String>) {
    // Defaults mirror nixie_core::config
    let interval = integer(config, "sweep", "interval_s").unwrap_or(30);
    let duration = integer(config, "sweep", "duration_s").unwrap_or(10);
    let advance = integer(config, "sweep", "advance_ticks").unwrap_or(1);

    if duration <= 0 {
        errors.push("[sweep] duration_s must be positive".to_string());
    }
    if interval <= duration {
        errors.push("[sweep] interval_s must be longer than duration_s".to_string());
    }
    if advance <= 0 {
        errors.push("[sweep] advance_ticks must be positive".to_string());
    }
    if interval > u32::MAX as i64 {
        errors.push("[sweep] interval_s is too large".to_string());
    }
}

fn validate_clock(config: &toml::Value, errors: &mut Vec<String>) {
    for key in ["hour_mode", "time_format"] {
        if let Some(value) = string(config, "clock", key) {
            if !["24h", "12h"].contains(&value) {
                errors.push(format!("[clock] {} must be '24h' or '12h'", key));
            }
        }
    }

    if let Some(poll) = integer(config, "clock", "poll_interval_ms") {
        if !(1..=MAX_POLL_INTERVAL_MS).contains(&poll) {
            errors.push("[clock] poll_interval_ms must be 1-1000".to_string());
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(variant) = string(config, "display", "variant") {
        if !["legacy", "latched"].contains(&variant) {
            errors.push("[display] variant must be 'legacy' or 'latched'".to_string());
        }
    }

    if let Some(freq) = integer(config, "display", "spi_frequency_hz") {
        if !(1..=MAX_SPI_FREQUENCY_HZ).contains(&freq) {
            errors.push("[display] spi_frequency_hz must be 1-1000000".to_string());
        }
    }
}
