//! Line checksum demo: reads a round count, then that many lines of
//! integers, printing each line's sum and a grand total.
//!
//! ```text
//! $ printf '2\n1 2 3\n10 20\n' | checksum
//! 6
//! 30
//! total 36
//! ```

use std::process::ExitCode;

use linekit::{Error, stdin};

fn run() -> Result<(), Error> {
    let mut input = stdin();
    let rounds: usize = input.value()?;
    let mut total: i64 = 0;
    for _ in 0..rounds {
        let sum: i64 = input.to_vec::<i64>()?.into_iter().sum();
        println!("{sum}");
        total += sum;
    }
    println!("total {total}");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("checksum: {err}");
            ExitCode::FAILURE
        }
    }
}
