//! Encode a nested scope tree into memory and read it back.
//!
//! Run with: `cargo run --example roundtrip`

use scopeframe::{MemorySink, MemorySource, ScopeReader, ScopeWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Producer side: a "Baseline" object holding station metadata and a
    // lightweight sample block.
    let mut sink = MemorySink::new();
    {
        let mut writer = ScopeWriter::new(&mut sink);

        let baseline = writer.open_scope(Some("Baseline"), 2)?;
        writer.write_string("CS002-CS003")?;
        writer.write_scalar(151.25f64)?; // centre frequency, MHz

        let samples = writer.open_scope(None, 0)?;
        writer.write_vector(&[0.5f32, -0.25, 0.125, 1.0])?;
        writer.write_bool_vector(&[true, true, false, true])?; // sample flags
        writer.close_scope(samples)?;

        let total = writer.close_scope(baseline)?;
        println!("encoded {total} bytes");
    }

    // Consumer side: mirror the producer's call sequence exactly.
    let mut source = MemorySource::new(sink.into_inner());
    let mut reader = ScopeReader::new(&mut source);

    let header = reader.open_scope(Some("Baseline"))?;
    println!("baseline version {}", header.version);
    println!("pair: {}", reader.read_string()?);
    println!("centre: {} MHz", reader.read_scalar::<f64>()?);

    reader.open_scope(None)?;
    println!("samples: {:?}", reader.read_vector::<f32>()?);
    println!("flags: {:?}", reader.read_bool_vector()?);
    reader.close_scope()?;

    reader.close_scope()?;
    Ok(())
}
