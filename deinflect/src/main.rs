use std::io::{stdin, BufRead};

use clap::Parser;
use lazy_static::lazy_static;
use regex::Regex;

use deinflect::Deinflector;

lazy_static! {
    static ref FRAGMENT_PATTERN: Regex = Regex::new(concat!(
        "[",
        "々",                // IDEOGRAPHIC ITERATION MARK (U+3005)
        "\u{3040}-\u{30ff}", // Hiragana, Katakana
        "\u{3400}-\u{4dbf}", // CJK Unified Ideographs Extension A
        "\u{4e00}-\u{9fff}", // CJK Unified Ideographs
        "\u{f900}-\u{faff}", // CJK Compatibility Ideographs
        "\u{ff66}-\u{ff9f}", // Halfwidth and Fullwidth Forms Block (hiragana and katakana)
        "]+",
    ))
    .unwrap();
}

/// Recover dictionary forms from conjugated Japanese words.
#[derive(Parser)]
struct Args {
    /// Words to deinflect; read from stdin when absent
    words: Vec<String>,
    /// Emit results as JSON
    #[arg(long)]
    json: bool,
    /// Dump the rule table grouped by reason and exit
    #[arg(long)]
    rules: bool,
    /// Log debug information
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let deinflector = Deinflector::new();

    if args.rules {
        let mut reasons: Vec<_> = deinflector.rules_by_reason().into_iter().collect();
        reasons.sort_by_key(|(reason, _)| *reason);
        for (reason, rules) in reasons {
            println!("{reason}:");
            for rule in rules {
                println!("    {}→{}", rule.from, rule.to);
            }
        }
        return;
    }

    if !args.words.is_empty() {
        for word in &args.words {
            show(&deinflector, word, args.json);
        }
        return;
    }

    for line in stdin().lock().lines() {
        let line = line.expect("stdin should be readable");
        for fragment in FRAGMENT_PATTERN.find_iter(&line) {
            show(&deinflector, fragment.as_str(), args.json);
        }
    }
}

fn show(deinflector: &Deinflector, word: &str, json: bool) {
    let results = deinflector.deinflect(word);
    if json {
        println!(
            "{}",
            serde_json::to_string(&results).expect("results should serialize")
        );
        return;
    }
    if results.is_empty() {
        println!("{word}: no match");
        return;
    }
    for result in results {
        let reasons = if result.reason_chain.is_empty() {
            String::from("as-is")
        } else {
            result.reason_chain.join(" < ")
        };
        match result.verb_type {
            Some(verb_type) => println!("{word} → {} ({reasons}; {verb_type:?})", result.base_form),
            None => println!("{word} → {} ({reasons})", result.base_form),
        }
    }
}
