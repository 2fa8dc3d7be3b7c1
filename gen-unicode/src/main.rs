//! Generates `src/emojitables.rs` from the Unicode emoji test data.
//!
//! Usage: `cargo run -p gen-unicode -- path/to/emoji-test.txt > src/emojitables.rs`

mod string_properties;

use std::io::{self, Write};
use std::{env, fs, process};

/// Accumulates the generated source.
pub(crate) struct GenUnicode {
    scope: String,
}

fn main() {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: gen-unicode <emoji-test.txt>");
        process::exit(2);
    };
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{}: {}", path, err);
            process::exit(1);
        }
    };
    let mut gen = GenUnicode {
        scope: String::new(),
    };
    gen.generate_string_properties(&text);
    io::stdout().write_all(gen.scope.as_bytes()).unwrap();
}
