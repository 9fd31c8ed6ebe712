use super::*;

#[test]
fn map_mask_keeps_unmapped_and_undefined() {
    let mut items = HashMap::new();
    items.insert('x', "stone");
    let mask = Mask::from_map(items);
    assert_eq!(mask.item(Some(&'x')), SlotUpdate::Set("stone"));
    assert_eq!(mask.item(Some(&'y')), SlotUpdate::Keep);
    assert_eq!(mask.item(None), SlotUpdate::Keep);
}

#[test]
fn clearing_item_is_distinct_from_keep() {
    let mask: Mask<bool, Option<&str>> = Mask::single(true, None);
    assert_eq!(mask.item(Some(&true)), SlotUpdate::Set(None));
    assert_eq!(mask.item(Some(&false)), SlotUpdate::Keep);
}

#[test]
fn closure_mask_sees_undefined_symbols() {
    let mask: Mask<u8, char> = Mask::new(|symbol| match symbol {
        None => SlotUpdate::Set('.'),
        Some(_) => SlotUpdate::Keep,
    });
    assert_eq!(mask.item(None), SlotUpdate::Set('.'));
    assert_eq!(mask.clone().item(Some(&1)), SlotUpdate::Keep);
}
