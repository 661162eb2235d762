// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use chrono;
use colored::*;

/// A standardized timestamp prefix for console messages
pub fn progress_timestamp(desc: &str) -> String {
    let time = chrono::Local::now();
    let ymd = time.format("%Y-%m-%d").to_string();
    let hms = time.format("%H:%M:%S").to_string();
    let time = format!("{} | {}", ymd, hms);

    format!(
        "{} {} {} {} {} {}",
        "[".bold(),
        time,
        "|".bold(),
        "canal".truecolor(196, 62, 52).bold(),
        "]".bold(),
        desc,
    )
}

/// Print timestamped statements to console
pub fn progress_log(desc: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("{}", progress_timestamp(desc));
}

/// Print a labelled block of captured process output
///
/// Empty output is skipped.
pub fn print_captured(label: &str, output: &str) {
    let output = output.trim_end();
    if output.is_empty() {
        return;
    }

    println!("{} {}", label.bold(), output);
}
