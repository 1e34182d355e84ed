use super::*;

fn src(tag: u8) -> ImageSource {
    ImageSource::from(vec![tag])
}

#[test]
fn slots_fill_in_any_order() {
    let mut slots = PhotoSlots::new();
    assert_eq!(slots.missing(), vec![0, 1, 2, 3]);

    slots.set(3, src(3)).unwrap();
    slots.set(0, src(0)).unwrap();
    assert_eq!(slots.filled(), 2);
    assert_eq!(slots.missing(), vec![1, 2]);
    assert!(!slots.is_complete());

    slots.set(2, src(2)).unwrap();
    slots.set(1, src(1)).unwrap();
    assert!(slots.is_complete());

    let sources = slots.into_sources().unwrap();
    for (i, s) in sources.iter().enumerate() {
        assert_eq!(*s, src(i as u8));
    }
}

#[test]
fn replacing_a_photo_returns_previous() {
    let mut slots = PhotoSlots::new();
    assert!(slots.set(1, src(1)).unwrap().is_none());
    assert_eq!(slots.set(1, src(9)).unwrap(), Some(src(1)));
    assert_eq!(slots.get(1), Some(&src(9)));
    assert_eq!(slots.clear(1), Some(src(9)));
    assert!(slots.get(1).is_none());
}

#[test]
fn out_of_range_slot_is_rejected() {
    let mut slots = PhotoSlots::new();
    assert!(slots.set(4, src(4)).is_err());
    assert!(slots.clear(7).is_none());
}

#[test]
fn incomplete_slots_do_not_yield_sources() {
    let mut slots = PhotoSlots::new();
    slots.set(0, src(0)).unwrap();
    let err = slots.into_sources().unwrap_err();
    assert!(err.to_string().contains("[1, 2, 3]"));
}

#[test]
fn try_from_vec_requires_exactly_four() {
    assert!(PhotoSlots::try_from(vec![src(0), src(1), src(2)]).is_err());
    assert!(PhotoSlots::try_from((0..5).map(src).collect::<Vec<_>>()).is_err());
    let slots = PhotoSlots::try_from((0..4).map(src).collect::<Vec<_>>()).unwrap();
    assert!(slots.is_complete());
}
