use super::*;
use crate::foundation::error::SlotframeError;

#[test]
fn nested_definition_builds_equivalent_schedule() {
    let def = ScheduleDef::from_json(
        r#"{
            "kind": "limit_time",
            "ticks": 10,
            "inner": {
                "kind": "append",
                "first": {"kind": "once", "delay": 3},
                "then": {"kind": "fixed_rate", "period": 2}
            }
        }"#,
    )
    .unwrap();
    let expected = Schedule::once(3)
        .append(Schedule::fixed_rate(2))
        .limit_time(10);
    assert_eq!(def.build(), expected);
}

#[test]
fn build_always_starts_fresh() {
    let def = ScheduleDef::Repeat {
        inner: Box::new(ScheduleDef::Delays {
            delays: vec![1, 2],
        }),
    };
    let mut first = def.build();
    first.next();
    assert_eq!(def.build().next(), Some(1));
}

#[test]
fn json_survives_a_round_trip() {
    let def = ScheduleDef::LimitSteps {
        steps: 4,
        inner: Box::new(ScheduleDef::Now),
    };
    let text = def.to_json_pretty().unwrap();
    assert_eq!(ScheduleDef::from_json(&text).unwrap(), def);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ScheduleDef::from_json(r#"{"kind": "once"}"#).unwrap_err();
    assert!(matches!(err, SlotframeError::Serde(_)));
    assert!(ScheduleDef::from_json(r#"{"kind": "sometimes"}"#).is_err());
}

#[test]
fn from_path_reads_definition_files() {
    let dir = std::env::temp_dir().join(format!("slotframe_def_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("fixed.json");
    std::fs::write(&good, r#"{"kind": "fixed_rate", "period": 4}"#).unwrap();
    assert_eq!(
        ScheduleDef::from_path(&good).unwrap(),
        ScheduleDef::FixedRate { period: 4 }
    );

    let bad = dir.join("bad.json");
    std::fs::write(&bad, r#"{"kind": "sometimes"}"#).unwrap();
    let err = ScheduleDef::from_path(&bad).unwrap_err();
    assert!(matches!(err, SlotframeError::Serde(_)), "{err}");
    assert!(err.to_string().contains("bad.json"));

    let err = ScheduleDef::from_path(&dir.join("missing.json")).unwrap_err();
    assert!(matches!(err, SlotframeError::Other(_)), "{err}");
    assert!(err.to_string().contains("read schedule"));

    std::fs::remove_dir_all(&dir).unwrap();
}
