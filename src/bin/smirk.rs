//! Line driver: parses each line of standard input as one SMILES string and
//! reports the outcome. Parse failures are reported, not fatal, so the
//! process always exits 0 on a readable stream.

use std::io::{self, BufRead};

use smirk::read::Parser;

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut parser = Parser::new();

    for line in stdin.lock().lines() {
        let line = line?;

        match parser.parse(&line) {
            Ok(()) => println!(
                "{} atoms, {} bonds",
                parser.atoms().len(),
                parser.bonds().len()
            ),
            Err(error) => println!("error: {error}"),
        }
    }

    Ok(())
}
