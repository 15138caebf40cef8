use super::helpers::{a_logging_event, field, init_tracing, logging_registry};
use anyhow::Result;
use bintag_codec::{Record, TypeShape, Value};
use bintag_types::serde::{TypeTag, TypeTagInt};

#[test]
fn logging_event_round_trip() -> Result<()> {
    init_tracing();
    let reg = logging_registry();
    let codec = reg.codec();

    let event = Value::from(a_logging_event());
    let bytes = codec.encode(&event)?;
    assert_eq!(*TypeTagInt::from(TypeTag::Object), bytes[0]);

    let decoded = codec.decode(&bytes, &TypeShape::record("LoggingEvent"))?;
    assert_eq!(event, decoded);

    assert_eq!(&Value::from("ERROR"), field(&decoded, &["level", "name"]));
    assert_eq!(&Value::from(1000), field(&decoded, &["level", "value"]));
    let frames = field(&decoded, &["location_information", "stack_frames"])
        .as_sequence()
        .unwrap();
    assert_eq!(2, frames.len());
    assert_eq!(
        &Value::from("Test2"),
        field(&frames.items[1], &["method", "name"])
    );

    // Same input, same bytes.
    assert_eq!(bytes, codec.encode(&decoded)?);
    Ok(())
}

#[test]
fn free_functions_match_codec() -> Result<()> {
    let reg = logging_registry();
    let event = Value::from(a_logging_event());

    let bytes = bintag_codec::encode(&reg, &event)?;
    assert_eq!(reg.codec().encode(&event)?, bytes);
    assert_eq!(
        event,
        bintag_codec::decode(&reg, &bytes, &TypeShape::record("LoggingEvent"))?
    );
    Ok(())
}

#[test]
fn absent_fields() -> Result<()> {
    init_tracing();
    let reg = logging_registry();
    let codec = reg.codec();

    let mut event = a_logging_event();
    event.set("location_information", Value::Absent);
    event.set("message_object", Value::Absent);
    event.set("properties", Value::Absent);
    let event = Value::from(event);

    let decoded = codec.decode(&codec.encode(&event)?, &TypeShape::record("LoggingEvent"))?;
    assert_eq!(event, decoded);
    assert!(field(&decoded, &["location_information"]).is_absent());
    assert!(field(&decoded, &["message_object"]).is_absent());
    Ok(())
}

#[test]
fn absent_string_field_is_not_empty_string() -> Result<()> {
    let reg = logging_registry();
    let codec = reg.codec();

    let level = Value::from(
        Record::new("Level")
            .with("name", Value::Absent)
            .with("value", 0),
    );
    let decoded = codec.decode(&codec.encode(&level)?, &TypeShape::record("Level"))?;
    assert_eq!(&Value::Absent, field(&decoded, &["name"]));
    Ok(())
}
