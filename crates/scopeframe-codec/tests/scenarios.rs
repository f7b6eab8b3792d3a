//! End-to-end encode/decode scenarios exercising the full framing contract.

use scopeframe_codec::{CodecError, ScopeReader, ScopeWriter, HEADER_FIXED};
use scopeframe_stream::{IoSink, IoSource, MemorySink, MemorySource};

#[test]
fn named_scope_roundtrip() {
    let mut sink = MemorySink::new();
    let mut writer = ScopeWriter::new(&mut sink);

    let scope = writer.open_scope(Some("Point"), 1).unwrap();
    writer.write_scalar(1.5f64).unwrap();
    writer.write_scalar(-2.25f64).unwrap();
    let written = writer.close_scope(scope).unwrap();
    assert_eq!(written, (HEADER_FIXED + "Point".len() + 16) as u64);

    let mut source = MemorySource::new(sink.into_inner());
    let mut reader = ScopeReader::new(&mut source);

    let header = reader.open_scope(Some("Point")).unwrap();
    assert_eq!(header.version, 1);
    assert_eq!(reader.read_scalar::<f64>().unwrap(), 1.5);
    assert_eq!(reader.read_scalar::<f64>().unwrap(), -2.25);
    let read = reader.close_scope().unwrap();
    assert_eq!(read, written);
}

#[test]
fn lightweight_scope_roundtrip() {
    let mut sink = MemorySink::new();
    let mut writer = ScopeWriter::new(&mut sink);

    let scope = writer.open_scope(None, 0).unwrap();
    writer.write_scalar(42u32).unwrap();
    writer.close_scope(scope).unwrap();

    let mut source = MemorySource::new(sink.into_inner());
    let mut reader = ScopeReader::new(&mut source);

    let header = reader.open_scope(None).unwrap();
    assert!(header.is_lightweight());
    assert_eq!(header.version, 0);
    assert_eq!(reader.read_scalar::<u32>().unwrap(), 42);
    reader.close_scope().unwrap();
}

#[test]
fn truncated_blob_fails_structural_check() {
    let mut sink = MemorySink::new();
    let mut writer = ScopeWriter::new(&mut sink);

    let scope = writer.open_scope(Some("Bulk"), 2).unwrap();
    writer.write_vector(&[1u32, 2, 3, 4]).unwrap();
    writer.close_scope(scope).unwrap();

    let mut bytes = sink.into_inner();
    bytes.truncate(bytes.len() - 4);

    let mut source = MemorySource::new(bytes);
    let mut reader = ScopeReader::new(&mut source);

    reader.open_scope(Some("Bulk")).unwrap();
    assert_eq!(reader.read_scalar::<u64>().unwrap(), 4);
    let values = reader.read_slice::<u32>(3).unwrap();
    assert_eq!(values, vec![1, 2, 3]);
    // The declared length still counts the lost element.
    let err = reader.close_scope().unwrap_err();
    assert!(matches!(err, CodecError::StructuralMismatch { .. }));
}

#[test]
fn bool_vector_scenario() {
    let values = [true, false, true, true, false];
    let mut sink = MemorySink::new();
    let mut writer = ScopeWriter::new(&mut sink);

    let scope = writer.open_scope(None, 0).unwrap();
    writer.write_bool_vector(&values).unwrap();
    let total = writer.close_scope(scope).unwrap();

    // u64 count field + one packed byte for five bits.
    assert_eq!(total, (HEADER_FIXED + 8 + 1) as u64);

    let mut source = MemorySource::new(sink.into_inner());
    let mut reader = ScopeReader::new(&mut source);
    reader.open_scope(None).unwrap();
    assert_eq!(reader.read_bool_vector().unwrap(), values);
    reader.close_scope().unwrap();
}

#[test]
fn heterogeneous_children_dispatched_by_peek() {
    let mut sink = MemorySink::new();
    let mut writer = ScopeWriter::new(&mut sink);

    let parent = writer.open_scope(Some("Set"), 1).unwrap();
    for (name, value) in [("A", 10i32), ("B", 20i32), ("A", 30i32)] {
        let child = writer.open_scope(Some(name), 1).unwrap();
        writer.write_scalar(value).unwrap();
        if name == "B" {
            writer.write_string("extra").unwrap();
        }
        writer.close_scope(child).unwrap();
    }
    writer.close_scope(parent).unwrap();

    let mut source = MemorySource::new(sink.into_inner());
    let mut reader = ScopeReader::new(&mut source);

    reader.open_scope(Some("Set")).unwrap();
    let mut seen = Vec::new();
    for _ in 0..3 {
        let peeked = reader.peek_scope().unwrap();
        // A second peek must return the identical cached descriptor.
        assert_eq!(reader.peek_scope().unwrap(), peeked);

        match peeked.name.as_deref() {
            Some("A") => {
                reader.open_scope(Some("A")).unwrap();
                seen.push(("A", reader.read_scalar::<i32>().unwrap()));
            }
            Some("B") => {
                reader.open_scope(Some("B")).unwrap();
                seen.push(("B", reader.read_scalar::<i32>().unwrap()));
                assert_eq!(reader.read_string().unwrap(), "extra");
            }
            other => panic!("unexpected child type: {other:?}"),
        }
        let child_total = reader.close_scope().unwrap();
        assert_eq!(child_total, peeked.length);
    }
    reader.close_scope().unwrap();

    assert_eq!(seen, vec![("A", 10), ("B", 20), ("A", 30)]);
}

#[test]
fn deep_nesting_length_invariant() {
    let mut sink = MemorySink::new();
    let mut writer = ScopeWriter::new(&mut sink);

    let mut ids = Vec::new();
    for depth in 0..6i32 {
        ids.push(writer.open_scope(Some("Level"), depth).unwrap());
        writer.write_scalar(depth as u64).unwrap();
    }
    let mut write_totals = Vec::new();
    for id in ids.into_iter().rev() {
        write_totals.push(writer.close_scope(id).unwrap());
    }

    let mut source = MemorySource::new(sink.into_inner());
    let mut reader = ScopeReader::new(&mut source);

    for depth in 0..6i32 {
        let header = reader.open_scope(Some("Level")).unwrap();
        assert_eq!(header.version, depth);
        assert_eq!(reader.read_scalar::<u64>().unwrap(), depth as u64);
    }
    let mut read_totals = Vec::new();
    for _ in 0..6 {
        read_totals.push(reader.close_scope().unwrap());
    }

    assert_eq!(read_totals, write_totals);
}

#[test]
fn socket_style_stream_skips_length_check() {
    // Socket-shaped path: writer cannot backpatch, reader tolerates the
    // unknown lengths and still validates framing order.
    let mut wire = Vec::new();
    {
        let mut sink = IoSink::new(&mut wire);
        let mut writer = ScopeWriter::new(&mut sink);

        let outer = writer.open_scope(Some("Msg"), 7).unwrap();
        writer.write_string("payload").unwrap();
        let inner = writer.open_scope(None, 0).unwrap();
        writer.write_vector(&[1u16, 2, 3]).unwrap();
        writer.close_scope(inner).unwrap();
        writer.close_scope(outer).unwrap();
        writer.flush().unwrap();
    }

    let mut source = IoSource::new(std::io::Cursor::new(wire));
    let mut reader = ScopeReader::new(&mut source);

    let header = reader.open_scope(Some("Msg")).unwrap();
    assert!(!header.length_known());
    assert_eq!(header.version, 7);
    assert_eq!(reader.read_string().unwrap(), "payload");
    reader.open_scope(None).unwrap();
    assert_eq!(reader.read_vector::<u16>().unwrap(), vec![1, 2, 3]);
    let inner_total = reader.close_scope().unwrap();
    assert_eq!(inner_total, (HEADER_FIXED + 8 + 6) as u64);
    reader.close_scope().unwrap();
}

#[test]
fn sibling_scopes_share_a_stream() {
    let mut sink = MemorySink::new();
    let mut writer = ScopeWriter::new(&mut sink);

    for i in 0..4u32 {
        let scope = writer.open_scope(Some("Chunk"), 1).unwrap();
        writer.write_scalar(i).unwrap();
        writer.close_scope(scope).unwrap();
    }

    let mut source = MemorySource::new(sink.into_inner());
    let mut reader = ScopeReader::new(&mut source);

    for i in 0..4u32 {
        reader.open_scope(Some("Chunk")).unwrap();
        assert_eq!(reader.read_scalar::<u32>().unwrap(), i);
        reader.close_scope().unwrap();
    }
}
