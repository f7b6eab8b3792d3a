use std::path::Path;

use scopeframe_codec::ScopeReader;
use scopeframe_stream::FileSource;

use crate::cmd::InspectArgs;
use crate::exit::{codec_error, stream_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_scopes, OutputFormat, ScopeRow};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let mut rows = walk_scopes(&args.path)?;
    if let Some(count) = args.count {
        rows.truncate(count);
    }
    print_scopes(&rows, format);
    Ok(SUCCESS)
}

/// Walk the chain of top-level scopes, skipping each scope's body by its
/// declared length. Nested scopes are covered by their parent's length and
/// not descended into (payload bytes are indistinguishable from headers
/// without the producer's schema).
pub fn walk_scopes(path: &Path) -> CliResult<Vec<ScopeRow>> {
    let mut source = FileSource::open(path).map_err(|err| stream_error("opening file", err))?;
    let file_len = source.len().unwrap_or(0);
    let mut reader = ScopeReader::new(&mut source);

    let mut rows = Vec::new();
    loop {
        let offset = reader.position().unwrap_or(0);
        if offset >= file_len {
            break;
        }

        let header = reader
            .peek_scope()
            .map_err(|err| codec_error("reading scope header", err))?;
        if !header.length_known() {
            return Err(CliError::new(
                DATA_INVALID,
                format!(
                    "scope #{} at offset {offset} has no backpatched length; cannot walk past it",
                    rows.len()
                ),
            ));
        }

        rows.push(ScopeRow {
            index: rows.len(),
            offset,
            name: header.name.clone().unwrap_or_default(),
            version: header.version,
            length: header.length,
            lightweight: header.is_lightweight(),
            byte_order: if header.big_endian { "big" } else { "little" },
        });

        let body = header
            .length
            .checked_sub(header.wire_size() as u64)
            .ok_or_else(|| {
                CliError::new(
                    DATA_INVALID,
                    format!("scope at offset {offset} declares less than its own header size"),
                )
            })?;
        reader
            .open_scope(None)
            .map_err(|err| codec_error("opening scope", err))?;
        reader
            .skip_space(body as usize)
            .map_err(|err| codec_error("skipping scope body", err))?;
        reader
            .close_scope()
            .map_err(|err| codec_error("closing scope", err))?;
    }

    Ok(rows)
}
