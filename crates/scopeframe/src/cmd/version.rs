use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("scopeframe {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: scopeframe");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "target_endian: {}",
        if cfg!(target_endian = "big") {
            "big"
        } else {
            "little"
        }
    );
    println!(
        "wire_format_version: {:#04x}",
        scopeframe_codec::WIRE_VERSION
    );
    if let Some(target) = option_env!("SCOPEFRAME_BUILD_TARGET") {
        println!("build_target: {target}");
    }

    Ok(SUCCESS)
}
