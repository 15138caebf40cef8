use super::helpers::{a_child, a_logging_event, a_parent, family_registry, logging_registry};
use anyhow::Result;
use bintag_codec::{SchemaRegistry, TypeShape, Value};
use std::thread;

fn round_trip(reg: &SchemaRegistry, value: &Value, shape: &TypeShape) -> Result<Vec<u8>> {
    let codec = reg.codec();
    let bytes = codec.encode(value)?;
    assert_eq!(value, &codec.decode(&bytes, shape)?);
    Ok(bytes)
}

/// Independent calls on many threads share the registries by reference only.
#[test]
fn concurrent_independent_calls() -> Result<()> {
    let logging = logging_registry();
    let family = family_registry();

    let event = Value::from(a_logging_event());
    let event_shape = TypeShape::record("LoggingEvent");
    let event_bytes = round_trip(&logging, &event, &event_shape)?;

    thread::scope(|scope| -> Result<()> {
        let handles = (0..8)
            .map(|thread_i| {
                let (logging, family) = (&logging, &family);
                let (event, event_shape, event_bytes) = (&event, &event_shape, &event_bytes);
                scope.spawn(move || -> Result<()> {
                    let parent = Value::from(a_parent((0..thread_i).map(a_child)));
                    for _ in 0..100 {
                        assert_eq!(event_bytes, &round_trip(logging, event, event_shape)?);
                        round_trip(family, &parent, &TypeShape::record("TestBase"))?;
                    }
                    Ok(())
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            match handle.join() {
                Ok(res) => res?,
                Err(e) => std::panic::resume_unwind(e),
            }
        }
        Ok(())
    })
}
