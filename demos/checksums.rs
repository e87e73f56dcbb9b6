//! Prints the checksum of each file given, or of stdin.
//!
//! ```text
//! cargo run --example checksums -- adler32 Cargo.toml src/lib.rs
//! LIBADLER_ENGINE=scalar cargo run --example checksums -- adler64 < Cargo.toml
//! ```

use std::fs::File;
use std::io::{self, Read};

use libadler::{Adler32, Adler64, Engine, Variant, Width};

fn checksum<R: Read>(engine: Engine, width: Width, reader: R) -> libadler::Result<u64> {
    match width {
        Width::W32 => {
            libadler::io::checksum_reader::<Adler32, R>(engine, Adler32::SEED, reader).map(u64::from)
        }
        Width::W64 => libadler::io::checksum_reader::<Adler64, R>(engine, Adler64::SEED, reader),
    }
}

fn print(width: Width, value: u64, name: &str) {
    match width {
        Width::W32 => println!("{value:08x} {name}"),
        Width::W64 => println!("{value:016x} {name}"),
    }
}

fn main() -> libadler::Result<()> {
    let mut args = std::env::args().skip(1);
    let width: Width = args.next().as_deref().unwrap_or("adler32").parse()?;
    let engine = Engine::detect();
    println!("engine: {engine}, width: {width}");

    let paths: Vec<String> = args.collect();
    if paths.is_empty() {
        let value = checksum(engine, width, io::stdin().lock())?;
        print(width, value, "-");
        return Ok(());
    }

    for path in paths {
        let value = checksum(engine, width, File::open(&path)?)?;
        print(width, value, &path);
    }
    Ok(())
}
