use super::helpers::init_tracing;
use anyhow::Result;
use bintag_codec::{Record, RecordSchema, SchemaRegistry, TypeShape, Value};
use bintag_types::CodecError;
use itertools::Itertools;

fn pair_registry(first_order: i32, second_order: i32) -> SchemaRegistry {
    SchemaRegistry::new().with(
        RecordSchema::new("Pair")
            .field("first", first_order, TypeShape::INT32)
            .field("second", second_order, TypeShape::INT32),
    )
}

#[test]
fn disagreeing_orders_swap_values_silently() -> Result<()> {
    init_tracing();
    let writer = pair_registry(0, 1);
    let reader = pair_registry(1, 0);

    let pair = Value::from(Record::new("Pair").with("first", 1).with("second", 2));
    let bytes = writer.codec().encode(&pair)?;
    let decoded = reader.codec().decode(&bytes, &TypeShape::record("Pair"))?;

    let swapped = Value::from(Record::new("Pair").with("first", 2).with("second", 1));
    assert_eq!(swapped, decoded);
    Ok(())
}

#[test]
fn disagreeing_orders_across_types_fail_on_conversion() -> Result<()> {
    let level = |name_order, value_order| {
        SchemaRegistry::new().with(
            RecordSchema::new("Level")
                .field("name", name_order, TypeShape::STRING)
                .field("value", value_order, TypeShape::INT32),
        )
    };
    let writer = level(0, 1);
    let reader = level(1, 0);

    let rec = Value::from(Record::new("Level").with("name", "ERROR").with("value", 1000));
    let bytes = writer.codec().encode(&rec)?;
    assert!(matches!(
        reader.codec().decode(&bytes, &TypeShape::record("Level")),
        Err(CodecError::SchemaMismatch(_))
    ));
    Ok(())
}

const FIELDS: [(&str, i32, TypeShape); 5] = [
    ("a", -4, TypeShape::INT64),
    ("b", 0, TypeShape::STRING),
    ("c", 0, TypeShape::BOOL),
    ("d", 9, TypeShape::DOUBLE),
    ("e", 3, TypeShape::DATETIME),
];

fn a_wide_record() -> Record {
    Record::new("Wide")
        .with("a", i64::MAX)
        .with("b", "bee")
        .with("c", true)
        .with("d", 0.25f64)
        .with("e", super::helpers::datetime(1900, 1, 1, 0, 0, 0, 1))
}

/// Only the relative order of equal `order`s is declaration-dependent, so
/// any permutation that keeps `b` before `c` produces identical bytes.
#[test]
fn consistent_descriptors_round_trip_under_any_declaration_order() -> Result<()> {
    let rec = Value::from(a_wide_record());
    let reference = {
        let schema = FIELDS
            .iter()
            .fold(RecordSchema::new("Wide"), |s, (name, order, shape)| {
                s.field(name, *order, shape.clone())
            });
        SchemaRegistry::new().with(schema).codec().encode(&rec)?
    };

    for perm in FIELDS.iter().permutations(FIELDS.len()) {
        let schema = perm
            .iter()
            .fold(RecordSchema::new("Wide"), |s, (name, order, shape)| {
                s.field(name, *order, shape.clone())
            });
        let reg = SchemaRegistry::new().with(schema);
        let codec = reg.codec();

        let bytes = codec.encode(&rec)?;
        assert_eq!(rec, codec.decode(&bytes, &TypeShape::record("Wide"))?);

        let b_first = perm.iter().position(|(n, ..)| *n == "b")
            < perm.iter().position(|(n, ..)| *n == "c");
        assert_eq!(b_first, bytes == reference, "{perm:?}");
    }
    Ok(())
}

/// Ignored fields never travel; the reader gets their zero values.
#[test]
fn ignored_subsets() -> Result<()> {
    let full = a_wide_record();
    let full_len = {
        let reg = SchemaRegistry::new().with(FIELDS.iter().fold(
            RecordSchema::new("Wide"),
            |s, (name, order, shape)| s.field(name, *order, shape.clone()),
        ));
        reg.codec().encode(&Value::from(full.clone()))?.len()
    };

    for ignored in FIELDS.iter().map(|(name, ..)| *name).powerset() {
        let schema = FIELDS
            .iter()
            .fold(RecordSchema::new("Wide"), |s, (name, order, shape)| {
                if ignored.contains(name) {
                    s.ignored(name, *order, shape.clone())
                } else {
                    s.field(name, *order, shape.clone())
                }
            });
        let reg = SchemaRegistry::new().with(schema);
        let codec = reg.codec();

        let bytes = codec.encode(&Value::from(full.clone()))?;
        assert_eq!(ignored.is_empty(), bytes.len() == full_len);

        let decoded = codec.decode(&bytes, &TypeShape::record("Wide"))?;
        let decoded = decoded.as_record().unwrap();
        for (name, _, shape) in FIELDS.iter() {
            let expected = if ignored.contains(name) {
                shape.zero_value()
            } else {
                full.get(name).cloned().unwrap()
            };
            assert_eq!(Some(&expected), decoded.get(name), "{ignored:?}");
        }
    }
    Ok(())
}
