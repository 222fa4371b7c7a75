use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use odegen::{generate, parse_string, SymbolTable, Target};

/// generates a MATLAB simulation script or a LaTeX equation listing from a
/// system of ordinary differential equations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input filename
    input: String,

    /// Output filename (defaults to ode_sim.m or ode.tex)
    #[arg(short, long)]
    out: Option<String>,

    /// Output target, either "matlab" or "latex"
    #[arg(short, long, default_value = "matlab")]
    target: String,
}

fn main() -> Result<()> {
    let cli = Args::parse();

    let target = match cli.target.as_str() {
        "matlab" => Target::Matlab,
        "latex" => Target::Latex,
        other => bail!("unknown target {}", other),
    };
    let out_name = cli.out.unwrap_or_else(|| {
        match target {
            Target::Matlab => "ode_sim.m",
            Target::Latex => "ode.tex",
        }
        .to_owned()
    });

    let text =
        fs::read_to_string(&cli.input).with_context(|| format!("cannot read {}", cli.input))?;

    let mut table = SymbolTable::new();
    parse_string(&text, &mut table).map_err(|e| anyhow::anyhow!("parse error:\n{}", e))?;

    let file =
        File::create(&out_name).with_context(|| format!("cannot create {}", out_name))?;
    let mut out = BufWriter::new(file);

    let diagnostics = generate(&mut table, target, &mut out)?;
    out.flush()
        .with_context(|| format!("cannot write {}", out_name))?;
    for diagnostic in &diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    Ok(())
}
