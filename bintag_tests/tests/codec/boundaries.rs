use super::helpers::datetime;
use anyhow::Result;
use bintag_codec::{Record, RecordSchema, SchemaRegistry, TypeShape, Value};
use bintag_types::serde::{Primitive, TypeTag, TypeTagInt};
use bintag_types::CodecError;
use chrono::NaiveDate;
use rand::Rng;

fn tag_of(bytes: &[u8]) -> Result<TypeTag> {
    Ok(TypeTag::try_from(TypeTagInt::from(bytes[0]))?)
}

#[test]
fn string_length_boundary() -> Result<()> {
    let reg =
        SchemaRegistry::new().with(RecordSchema::new("Note").field("text", 0, TypeShape::STRING));
    let codec = reg.codec();

    let max = "x".repeat(255);
    let bytes = codec.encode(&Value::from(max.as_str()))?;
    assert_eq!(2 + 255, bytes.len());
    assert_eq!(Value::from(max), codec.decode(&bytes, &TypeShape::STRING)?);

    let over = "x".repeat(256);
    let note = Value::from(Record::new("Note").with("text", over));
    assert_eq!(
        Err(CodecError::LengthOverflow {
            what: "String",
            len: 256,
            max: 255
        }),
        codec.encode(&note)
    );
    Ok(())
}

#[test]
fn latin1_text() -> Result<()> {
    let reg = SchemaRegistry::new();
    let codec = reg.codec();

    let text = "café ÿ";
    let bytes = codec.encode(&Value::from(text))?;
    assert_eq!(2 + text.chars().count(), bytes.len());
    assert_eq!(Value::from(text), codec.decode(&bytes, &TypeShape::STRING)?);

    assert!(matches!(
        codec.encode(&Value::from("日本")),
        Err(CodecError::UnsupportedValue(_))
    ));
    Ok(())
}

#[test]
fn integers_compact_to_the_narrowest_tag() -> Result<()> {
    let reg = SchemaRegistry::new();
    let codec = reg.codec();

    let cases = [
        (0i64, TypeTag::Byte),
        (255, TypeTag::Byte),
        (256, TypeTag::Int16),
        (-1, TypeTag::Int16),
        (i64::from(i16::MIN), TypeTag::Int16),
        (i64::from(i16::MAX) + 1, TypeTag::Int32),
        (i64::from(i32::MIN), TypeTag::Int32),
        (i64::from(i32::MAX) + 1, TypeTag::Int64),
        (i64::MIN, TypeTag::Int64),
    ];
    for (i, exp_tag) in cases {
        let bytes = codec.encode(&Value::from(i))?;
        assert_eq!(exp_tag, tag_of(&bytes)?, "{i}");
        assert_eq!(Value::from(i), codec.decode(&bytes, &TypeShape::INT64)?);
    }
    Ok(())
}

#[test]
fn floats_compact_only_when_exact() -> Result<()> {
    let reg = SchemaRegistry::new();
    let codec = reg.codec();

    let cases = [
        (3.0f64, TypeTag::Byte),
        (-3.0, TypeTag::Int16),
        (70_000.0, TypeTag::Int32),
        (0.5, TypeTag::Double),
        (-0.0, TypeTag::Double),
        (1e12, TypeTag::Double),
        (f64::NAN, TypeTag::Double),
        (f64::INFINITY, TypeTag::Double),
    ];
    for (f, exp_tag) in cases {
        let bytes = codec.encode(&Value::from(f))?;
        assert_eq!(exp_tag, tag_of(&bytes)?, "{f}");

        let decoded = codec.decode(&bytes, &TypeShape::DOUBLE)?;
        match decoded.as_primitive() {
            Some(Primitive::Double(g)) => assert_eq!(f.to_bits(), g.to_bits(), "{f}"),
            other => panic!("{other:?}"),
        }
    }

    let bytes = codec.encode(&Value::from(2.5f32))?;
    assert_eq!(TypeTag::Float, tag_of(&bytes)?);
    Ok(())
}

#[test]
fn random_integers_survive() -> Result<()> {
    let mut rand_rng = rand::thread_rng();
    let reg = SchemaRegistry::new();
    let codec = reg.codec();

    for _ in 0..1000 {
        let i: i64 = rand_rng.gen();
        let shift = rand_rng.gen_range(0..64u32);
        let i = i >> shift;
        let bytes = codec.encode(&Value::from(i))?;
        assert_eq!(Value::from(i), codec.decode(&bytes, &TypeShape::INT64)?);
    }
    Ok(())
}

#[test]
fn narrowing_on_decode() -> Result<()> {
    let reg = SchemaRegistry::new();
    let codec = reg.codec();

    let wide = codec.encode(&Value::from(70_000i32))?;
    assert!(matches!(
        codec.decode(&wide, &TypeShape::INT16),
        Err(CodecError::SchemaMismatch(_))
    ));

    let fractional = codec.encode(&Value::from(1.5f64))?;
    assert_eq!(Value::from(1.5f32), codec.decode(&fractional, &TypeShape::FLOAT)?);
    assert!(matches!(
        codec.decode(&fractional, &TypeShape::INT32),
        Err(CodecError::SchemaMismatch(_))
    ));

    let flag = codec.encode(&Value::from(true))?;
    assert!(matches!(
        codec.decode(&flag, &TypeShape::BYTE),
        Err(CodecError::SchemaMismatch(_))
    ));
    Ok(())
}

#[test]
fn datetimes() -> Result<()> {
    let reg = SchemaRegistry::new();
    let codec = reg.codec();

    for dt in [
        datetime(1970, 1, 1, 0, 0, 0, 0),
        datetime(1601, 1, 1, 0, 0, 0, 1),
        datetime(9999, 12, 31, 23, 59, 59, 999_999),
    ] {
        let bytes = codec.encode(&Value::from(dt))?;
        assert_eq!(1 + 8, bytes.len());
        assert_eq!(TypeTag::DateTime, tag_of(&bytes)?);
        assert_eq!(Value::from(dt), codec.decode(&bytes, &TypeShape::DATETIME)?);
        assert_eq!(Value::from(dt), codec.decode(&bytes, &TypeShape::Any)?);
    }

    let mut out_of_range = vec![*TypeTagInt::from(TypeTag::DateTime)];
    out_of_range.extend(i64::MAX.to_ne_bytes());
    assert!(matches!(
        codec.decode(&out_of_range, &TypeShape::DATETIME),
        Err(CodecError::MalformedStream(_))
    ));
    Ok(())
}

#[test]
fn datetimes_below_a_microsecond_are_refused() -> Result<()> {
    let reg = SchemaRegistry::new()
        .with(RecordSchema::new("Stamp").field("at", 0, TypeShape::DATETIME));
    let codec = reg.codec();

    let day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
    let sub_micro = day.and_hms_nano_opt(13, 45, 2, 123_456_789).unwrap();
    let leap = day.and_hms_micro_opt(23, 59, 59, 1_000_000).unwrap();
    for dt in [sub_micro, leap] {
        assert!(matches!(
            codec.encode(&Value::from(dt)),
            Err(CodecError::UnsupportedValue(_))
        ));
        assert!(matches!(
            codec.encode(&Value::from(Record::new("Stamp").with("at", dt))),
            Err(CodecError::UnsupportedValue(_))
        ));
    }

    let whole_micro = day.and_hms_nano_opt(13, 45, 2, 123_456_000).unwrap();
    let bytes = codec.encode(&Value::from(whole_micro))?;
    assert_eq!(Value::from(whole_micro), codec.decode(&bytes, &TypeShape::DATETIME)?);
    Ok(())
}
