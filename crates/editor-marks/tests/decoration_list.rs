use editor_marks::{DecorationList, INDICATOR_IME, INDICATOR_MAX};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn values(list: &DecorationList, indicator: u32, range: std::ops::Range<usize>) -> Vec<i32> {
    range.map(|pos| list.value_at(indicator, pos)).collect()
}

#[test]
fn test_fill_then_insert_space_scenario() {
    let mut list = DecorationList::with_length(100);
    list.create(5, 100);
    assert_eq!(list.current_indicator(), 5);

    assert_eq!(list.fill_range(10, 7, 5), Some(10..15));
    assert_eq!(values(&list, 5, 10..15), vec![7; 5]);
    assert!(values(&list, 5, 0..10).iter().all(|&v| v == 0));
    assert!(values(&list, 5, 15..100).iter().all(|&v| v == 0));

    list.insert_space(12, 3);
    assert_eq!(list.len(), 103);
    assert_eq!(values(&list, 5, 10..12), vec![7, 7]);
    assert_eq!(values(&list, 5, 12..15), vec![0, 0, 0]);
    assert_eq!(values(&list, 5, 15..18), vec![7, 7, 7]);
    assert_eq!(list.value_at(5, 18), 0);
    assert_eq!(list.decoration_from_indicator(5).unwrap().len(), 103);
}

#[test]
fn test_fill_does_not_touch_outside_range() {
    let mut list = DecorationList::with_length(40);
    list.set_current_indicator(1);
    list.fill_range(0, 3, 40);
    list.fill_range(10, 4, 10);

    assert_eq!(values(&list, 1, 8..10), vec![3, 3]);
    assert_eq!(values(&list, 1, 10..20), vec![4; 10]);
    assert_eq!(values(&list, 1, 20..22), vec![3, 3]);
    assert_eq!(list.start(1, 15), 10);
    assert_eq!(list.end(1, 15), 20);
}

#[test]
fn test_filling_back_to_zero_prunes() {
    let mut list = DecorationList::with_length(30);
    list.set_current_indicator(3);
    list.fill_range(5, 1, 10);
    assert!(list.decoration_from_indicator(3).is_some());
    assert_eq!(list.all_on_for(7), 1 << 3);

    list.fill_range(5, 0, 10);
    assert!(list.decoration_from_indicator(3).is_none());
    assert_eq!(list.all_on_for(7), 0);
    assert_eq!(list.decoration_count(), 0);
}

#[test]
fn test_delete_range_prunes_emptied_decorations() {
    let mut list = DecorationList::with_length(30);
    list.set_current_indicator(2);
    list.fill_range(10, 1, 5);
    list.set_current_indicator(4);
    list.fill_range(25, 1, 5);

    list.delete_range(8, 10);
    assert_eq!(list.len(), 20);
    assert_eq!(list.indicators(), vec![4]);
    assert_eq!(list.value_at(4, 15), 1);
}

#[test]
fn test_delete_whole_document_drops_all() {
    let mut list = DecorationList::with_length(10);
    list.set_current_indicator(1);
    list.fill_range(0, 1, 10);
    list.delete_range(0, 10);
    assert_eq!(list.len(), 0);
    assert_eq!(list.decoration_count(), 0);
}

#[test]
fn test_insert_space_at_end_extends_with_zero() {
    let mut list = DecorationList::with_length(10);
    list.set_current_indicator(1);
    list.fill_range(5, 2, 5);

    list.insert_space(10, 4);
    assert_eq!(list.len(), 14);
    assert_eq!(values(&list, 1, 8..14), vec![2, 2, 0, 0, 0, 0]);
    assert_eq!(list.decoration_from_indicator(1).unwrap().len(), 14);
}

#[test]
fn test_insert_space_without_decorations_still_grows() {
    let mut list = DecorationList::new();
    list.insert_space(0, 12);
    assert_eq!(list.len(), 12);

    list.set_current_indicator(0);
    list.fill_range(0, 1, 12);
    assert_eq!(list.decoration_from_indicator(0).unwrap().len(), 12);
}

#[test]
fn test_set_current_value_zero_becomes_one() {
    let mut list = DecorationList::with_length(10);
    list.set_current_indicator(1);
    list.set_current_value(0);
    assert_eq!(list.current_value(), 1);

    list.set_current_value(-5);
    assert_eq!(list.current_value(), -5);

    // The coerced value still marks positions as "on".
    list.set_current_value(0);
    list.fill_current(2, 2);
    assert_eq!(list.value_at(1, 2), 1);
}

#[test]
fn test_all_on_for_excludes_ime_indicators() {
    let mut list = DecorationList::with_length(10);
    for indicator in [0, 8, 31, INDICATOR_IME, INDICATOR_MAX] {
        list.set_current_indicator(indicator);
        list.fill_range(0, 1, 10);
    }

    let mask = list.all_on_for(4);
    assert_eq!(mask, (1u32 << 0) | (1 << 8) | (1 << 31));
    assert_eq!(list.value_at(INDICATOR_IME, 4), 1);
    assert_eq!(list.value_at(INDICATOR_MAX, 4), 1);
}

#[test]
fn test_absent_indicator_reads_as_zero() {
    let list = DecorationList::with_length(10);
    assert_eq!(list.value_at(7, 3), 0);
    assert_eq!(list.start(7, 3), 0);
    assert_eq!(list.end(7, 3), 0);
    assert_eq!(list.all_on_for(3), 0);
}

#[test]
fn test_random_edits_keep_lengths_in_step() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut list = DecorationList::with_length(200);

    for _ in 0..2_000 {
        let length = list.len();
        match rng.gen_range(0..4) {
            0 => {
                list.set_current_indicator(rng.gen_range(0..=INDICATOR_MAX));
                let position = rng.gen_range(0..=length);
                let fill = rng.gen_range(0..20);
                list.fill_range(position, rng.gen_range(0..3), fill);
            }
            1 => list.insert_space(rng.gen_range(0..=length), rng.gen_range(1..15)),
            2 => {
                let position = rng.gen_range(0..=length);
                list.delete_range(position, rng.gen_range(0..15));
            }
            _ => {
                if let Some(&indicator) = list.indicators().first() {
                    list.delete(indicator);
                }
            }
        }

        for decoration in list.iter() {
            assert_eq!(decoration.len(), list.len());
            assert!(!decoration.is_empty());
            let covered: usize = decoration.runs().iter_runs().map(|(r, _)| r.len()).sum();
            assert_eq!(covered, list.len());
        }
        let indicators = list.indicators();
        assert!(indicators.windows(2).all(|w| w[0] < w[1]));
    }
}
