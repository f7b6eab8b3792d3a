use serde::Serialize;

use crate::cmd::inspect::walk_scopes;
use crate::cmd::CheckArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct CheckOutput {
    file: String,
    scopes: usize,
    bytes: u64,
    status: &'static str,
}

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    // walk_scopes already fails with a data-invalid exit code on bad magic,
    // length mismatches, or truncation; reaching the end means the scope
    // chain tiles the file exactly.
    let rows = walk_scopes(&args.path)?;
    let bytes = rows.iter().map(|row| row.length).sum();

    let out = CheckOutput {
        file: args.path.display().to_string(),
        scopes: rows.len(),
        bytes,
        status: "ok",
    };

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table | OutputFormat::Pretty => println!(
            "{}: {} scopes, {} bytes, framing ok",
            out.file, out.scopes, out.bytes
        ),
    }

    Ok(SUCCESS)
}
