use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use rvlisting::isa::rv32::Rv32;
use rvlisting::{prettify, PrettyConfig};

mod report;
use report::{label_list, Report};

#[derive(Parser, Debug)]
#[command(author, version, about = "Prettify disassembled RISC-V listings with labels", long_about = None)]
struct Cli {
    /// Input listing (`0x<addr>:\t<bytes>\t<mnemonic>\t<operands>` lines)
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output path for the labeled listing
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
    /// Prefix for generated label names
    #[arg(long, default_value = "loc_")]
    label_prefix: String,
    /// Do not insert a blank line before label declarations
    #[arg(long)]
    no_label_spacing: bool,
    /// Export labels to JSON (Vec<{ addr, name }>)
    #[arg(long, value_name = "FILE")]
    labels_out: Option<PathBuf>,
    /// Write a JSON run report
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> PrettyConfig {
        PrettyConfig {
            label_prefix: self.label_prefix.clone(),
            label_spacing: !self.no_label_spacing,
        }
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    rvlisting::io::write_listing(path, &json)
        .with_context(|| format!("writing {}", path.display()))
}

fn run(cli: &Cli) -> Result<usize> {
    let isa = Rv32::new();
    tracing::debug!(input = %cli.input.display(), output = %cli.output.display(), "prettify");
    let text = rvlisting::io::read_listing(&cli.input)?;
    let pretty = prettify(&text, &cli.config(), &isa)
        .with_context(|| format!("processing {}", cli.input.display()))?;

    rvlisting::io::write_listing(&cli.output, &pretty.text)?;
    if let Some(path) = &cli.labels_out {
        write_json(path, &label_list(&pretty.labels))?;
        tracing::info!(path = %path.display(), "labels exported");
    }
    if let Some(path) = &cli.report {
        write_json(path, &Report::new(&isa, &pretty))?;
    }
    Ok(pretty.labels.len())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let labels = run(&cli)?;
    println!("Pretty ASM generated: {} (labels={labels})", cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rv-pretty-{}-{name}", std::process::id()))
    }

    fn cli(input: PathBuf, output: PathBuf) -> Cli {
        Cli {
            input,
            output,
            label_prefix: "loc_".into(),
            no_label_spacing: false,
            labels_out: None,
            report: None,
        }
    }

    #[test]
    fn args_parse() {
        let c = Cli::try_parse_from([
            "rv-pretty", "--input", "a.asm", "--output", "b.asm", "--label-prefix", "L_",
            "--no-label-spacing",
        ])
        .unwrap();
        assert_eq!(c.input, PathBuf::from("a.asm"));
        assert_eq!(c.config().label_prefix, "L_");
        assert!(!c.config().label_spacing);
        assert!(Cli::try_parse_from(["rv-pretty", "--input", "a.asm"]).is_err());
    }

    #[test]
    fn missing_input_writes_nothing() {
        let out = scratch("missing.out");
        let err = run(&cli(scratch("does-not-exist.asm"), out.clone())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<rvlisting::Error>(),
            Some(rvlisting::Error::InputNotFound { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn format_error_writes_nothing() {
        let input = scratch("bad.asm");
        let out = scratch("bad.out");
        std::fs::write(&input, "0x0: 13000000 nop\n0xfffffffff: 13000000 nop\n").unwrap();
        assert!(run(&cli(input.clone(), out.clone())).is_err());
        assert!(!out.exists());
        let _ = std::fs::remove_file(&input);
    }

    #[test]
    fn end_to_end_with_exports() {
        let dir = scratch("e2e");
        let input = dir.join("in.asm");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            &input,
            "; input=fw.bin\n0x00000000:\t6f008000\tj\t0x00000008\n0x00000008:\t13000000\taddi\tzero, zero, 0\n",
        )
        .unwrap();
        let mut c = cli(input, dir.join("nested/out.asm"));
        c.labels_out = Some(dir.join("labels.json"));
        c.report = Some(dir.join("report.json"));

        assert_eq!(run(&c).unwrap(), 1);
        let text = std::fs::read_to_string(&c.output).unwrap();
        assert!(text.contains("loc_00000008:\n0x00000008:"));
        let labels: Vec<report::LabelKV> =
            serde_json::from_str(&std::fs::read_to_string(dir.join("labels.json")).unwrap()).unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].addr, 8);
        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("report.json")).unwrap()).unwrap();
        assert_eq!(report["rewritten"], 1);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
