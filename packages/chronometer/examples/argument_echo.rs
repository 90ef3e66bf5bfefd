//! Wrapping functions with `chronometer` so that call arguments become part of the key.
//!
//! Calls with different argument values are recorded under different keys, which makes it
//! easy to see how the duration depends on the input.
//!
//! Run with: `cargo run --example argument_echo`.

use std::hint::black_box;

use chronometer::{CallArguments, Chronometer, EchoArgs, Options, Parameters};

/// Arguments of a search call, passed by name.
struct Search {
    haystack_len: usize,
    needle: u64,
}

impl CallArguments for Search {
    fn positional(&self) -> Vec<String> {
        Vec::new()
    }

    fn keywords(&self) -> Vec<(String, String)> {
        vec![
            ("haystack_len".to_string(), self.haystack_len.to_string()),
            ("needle".to_string(), self.needle.to_string()),
        ]
    }
}

fn main() -> chronometer::Result<()> {
    println!("=== Argument Echo Example ===");
    println!();

    let chronometer = Chronometer::builder().precision(4).build();

    let sum_to = chronometer.wrap_with_args(
        "sum_to",
        Parameters::new("sum_to")
            .param("n")
            .param_with_default("step", 1),
        EchoArgs::All,
        Options::new(),
        |(n,): (u64,)| (0..n).sum::<u64>(),
    )?;

    for n in [1_000, 100_000, 10_000_000] {
        black_box(sum_to((n,))?);
    }

    let search = chronometer.wrap_with_args(
        "search",
        Parameters::from_names("search", ["haystack_len", "needle"]),
        EchoArgs::only(["haystack_len"]),
        Options::new().log(false),
        |Search { haystack_len, needle }: Search| {
            (0..u64::try_from(haystack_len).unwrap_or(u64::MAX)).position(|x| x == needle)
        },
    )?;

    for haystack_len in [10, 10_000, 1_000_000] {
        for needle in [0, 5, 999] {
            black_box(search(Search {
                haystack_len,
                needle,
            })?);
        }
    }

    println!();
    println!("=== Summary ===");
    chronometer.summary();

    Ok(())
}
