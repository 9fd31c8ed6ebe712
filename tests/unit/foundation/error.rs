use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlotframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SlotframeError::state("x").to_string().contains("state error:"));
    assert!(
        SlotframeError::unsupported("x")
            .to_string()
            .contains("unsupported:")
    );
    assert!(
        SlotframeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlotframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: SlotframeError = serde_json::from_str::<u64>("not json").unwrap_err().into();
    assert!(matches!(err, SlotframeError::Serde(_)));
}
