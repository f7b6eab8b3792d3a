mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "scopeframe", version, about = "Scope framing inspection CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inspect_subcommand() {
        let cli = Cli::try_parse_from(["scopeframe", "inspect", "/tmp/samples.blob"])
            .expect("inspect args should parse");

        assert!(matches!(cli.command, Command::Inspect(_)));
    }

    #[test]
    fn parses_check_with_json_format() {
        let cli = Cli::try_parse_from([
            "scopeframe",
            "check",
            "/tmp/samples.blob",
            "--format",
            "json",
        ])
        .expect("check args should parse");

        assert!(matches!(cli.command, Command::Check(_)));
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        let err = Cli::try_parse_from(["scopeframe", "frobnicate"])
            .expect_err("unknown subcommand should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn inspect_and_check_report_real_file() {
        use crate::exit::SUCCESS;
        use scopeframe_codec::ScopeWriter;
        use scopeframe_stream::FileSink;

        let path = std::env::temp_dir().join(format!(
            "scopeframe-cli-walk-{}.blob",
            std::process::id()
        ));

        let mut sink = FileSink::create(&path).unwrap();
        let mut writer = ScopeWriter::new(&mut sink);
        for version in 0..3 {
            let scope = writer.open_scope(Some("Sample"), version).unwrap();
            writer.write_vector(&[1.0f64, 2.0, 3.0]).unwrap();
            writer.close_scope(scope).unwrap();
        }
        writer.flush().unwrap();
        drop(writer);
        drop(sink);

        let rows = cmd::inspect::walk_scopes(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.name == "Sample"));

        let code = cmd::check::run(
            cmd::CheckArgs { path: path.clone() },
            OutputFormat::Pretty,
        )
        .unwrap();
        assert_eq!(code, SUCCESS);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn check_flags_corrupt_file() {
        use crate::exit::DATA_INVALID;

        let path = std::env::temp_dir().join(format!(
            "scopeframe-cli-corrupt-{}.blob",
            std::process::id()
        ));
        std::fs::write(&path, [0u8; 40]).unwrap();

        let err = cmd::check::run(cmd::CheckArgs { path: path.clone() }, OutputFormat::Pretty)
            .unwrap_err();
        assert_eq!(err.code, DATA_INVALID);

        let _ = std::fs::remove_file(&path);
    }
}
