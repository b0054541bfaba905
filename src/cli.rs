// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::params::{OutputFormat, Params};
use crate::runner::{self, Progress};
use crate::specs::variables;

pub fn run() -> Result<(), Box<dyn Error>> {
    let mut params = Params::new();
    parse_cli(&mut params)?;

    if params.list_vars {
        for v in variables::VARIABLES {
            println!("{}\t{}\t{}", v.name, v.unit, v.description);
        }
        return Ok(());
    }

    let mut progress = ConsoleProgress::default();
    let summary = match runner::run(&params, Some(&mut progress)) {
        Ok(s) => s,
        Err(e) => {
            loge!("run failed: {e}");
            return Err(e);
        }
    };
    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn parse_cli(params: &mut Params) -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-i" | "--input" => {
                let v = args.next().ok_or("Missing value for --input")?;
                params.input = Some(PathBuf::from(v));}
            "--var" => {
                let v = args.next().ok_or("Missing value for --var")?;
                params.variables.extend(parse_name_list(&v));}
            "--all-vars" => params.all_vars = true,
            "--peer" => params.peer = true,
            "--shifted" => params.shifted = true,
            "--city" => {
                let v = args.next().ok_or("Missing value for --city")?;
                params
                    .cities
                    .get_or_insert_with(Vec::new)
                    .extend(parse_name_list(&v));}
            "-o" | "--out" => params.out = Some(PathBuf::from(args.next().ok_or("Missing output path")?)),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => OutputFormat::Csv,
                    "tsv" => OutputFormat::Tsv,
                    "json" => OutputFormat::Json,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };}
            "--no-headers" => params.include_headers = false,
            "--list-vars" => params.list_vars = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if !params.list_vars && params.input.is_none() {
        return Err("Missing input file (-i/--input)".into());
    }

    Ok(())
}

/// Comma-separated names; empty segments dropped, duplicates removed,
/// first-seen order kept.
fn parse_name_list(s: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if !out.iter().any(|p| p.eq_ignore_ascii_case(part)) {
            out.push(part.to_string());
        }
    }
    out
}

#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, variable: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {}", self.done, self.total, variable);
    }
}
