use super::{List, Song, Songlist, VisualRange};

fn numbers(len: usize) -> List<usize> {
    List::from((0..len).collect::<Vec<_>>())
}

fn selected_indices<T>(list: &List<T>) -> Vec<usize> {
    (0..list.len()).filter(|index| list.selected(*index)).collect()
}

#[test]
fn set_cursor_should_clamp_into_bounds() {
    let mut list = numbers(5);
    list.set_cursor(99);
    assert_eq!(list.cursor(), 4);
    list.move_cursor(-10);
    assert_eq!(list.cursor(), 0);
    list.move_cursor(2);
    assert_eq!(list.cursor(), 2);
}

#[test]
fn set_cursor_should_stay_at_zero_on_empty_list() {
    let mut list = numbers(0);
    list.set_cursor(3);
    assert_eq!(list.cursor(), 0);
    list.move_cursor(-1);
    assert_eq!(list.cursor(), 0);
}

#[test]
fn visual_selection_should_follow_cursor_around_fixed_start() {
    let mut list = numbers(10);
    list.set_cursor(4);
    list.enable_visual_selection();
    assert_eq!(
        list.visual(),
        Some(VisualRange {
            min: 4,
            max: 4,
            start: 4
        })
    );

    list.move_cursor(3);
    assert_eq!(
        list.visual(),
        Some(VisualRange {
            min: 4,
            max: 7,
            start: 4
        })
    );

    list.set_cursor(1);
    assert_eq!(
        list.visual(),
        Some(VisualRange {
            min: 1,
            max: 4,
            start: 4
        })
    );
    assert_eq!(selected_indices(&list), vec![1, 2, 3, 4]);
}

#[test]
fn selected_should_combine_manual_and_visual_by_exclusive_or() {
    let mut list = numbers(6);
    list.set_selected(2, true);
    list.set_selected(5, true);
    list.set_cursor(1);
    list.enable_visual_selection();
    list.set_cursor(3);

    assert_eq!(selected_indices(&list), vec![1, 3, 5]);
    assert!(!list.selected(2));
}

#[test]
fn commit_then_disable_should_leave_selection_unchanged() {
    let setups: [(&[usize], Option<(usize, usize)>); 4] = [
        (&[], Some((2, 5))),
        (&[3, 7], Some((1, 4))),
        (&[0, 9], None),
        (&[4], Some((6, 2))),
    ];
    for (manual, visual) in setups {
        let mut list = numbers(10);
        for index in manual {
            list.set_selected(*index, true);
        }
        if let Some((start, end)) = visual {
            list.set_cursor(start);
            list.enable_visual_selection();
            list.set_cursor(end);
        }
        let before = selected_indices(&list);

        list.commit_visual_selection();
        list.disable_visual_selection();

        assert_eq!(selected_indices(&list), before, "{manual:?} {visual:?}");
        assert!(!list.has_visual_selection());
    }
}

#[test]
fn selection_indices_should_fall_back_to_cursor() {
    let mut list = numbers(5);
    list.set_cursor(3);
    assert_eq!(list.selection_indices(), vec![3]);
    assert!(!list.has_selection());

    let empty = numbers(0);
    assert!(empty.selection_indices().is_empty());
}

#[test]
fn toggle_selected_should_flip_manual_membership() {
    let mut list = numbers(3);
    list.toggle_selected(1);
    assert_eq!(list.selection_indices(), vec![1]);
    list.toggle_selected(1);
    assert!(!list.has_selection());
    list.toggle_selected(7);
    assert!(!list.has_selection());
}

#[test]
fn select_all_and_clear_should_reset_both_mechanisms() {
    let mut list = numbers(4);
    list.enable_visual_selection();
    list.select_all();
    assert_eq!(list.selection_indices(), vec![0, 1, 2, 3]);
    assert!(!list.has_visual_selection());

    list.clear_selection();
    assert!(!list.has_selection());
}

#[test]
fn remove_should_return_items_and_park_cursor_on_first_gap() {
    let mut list = numbers(6);
    list.set_selected(1, true);
    list.set_selected(4, true);
    list.set_cursor(5);

    let removed = list.remove(&list.selection_indices());
    assert_eq!(removed, vec![1, 4]);
    assert_eq!(list.items(), &[0, 2, 3, 5]);
    assert_eq!(list.cursor(), 1);
    assert!(!list.has_selection());
}

#[test]
fn remove_should_clamp_cursor_when_tail_is_removed() {
    let mut list = numbers(3);
    let removed = list.remove(&[2]);
    assert_eq!(removed, vec![2]);
    assert_eq!(list.cursor(), 1);

    let removed = list.remove(&[0, 1, 8]);
    assert_eq!(removed, vec![0, 1]);
    assert!(list.is_empty());
    assert_eq!(list.cursor(), 0);
}

#[test]
fn insert_should_splice_at_clamped_position() {
    let mut list = numbers(3);
    list.insert(1, vec![10, 11]);
    assert_eq!(list.items(), &[0, 10, 11, 1, 2]);
    list.insert(99, vec![12]);
    assert_eq!(list.items(), &[0, 10, 11, 1, 2, 12]);
}

#[test]
fn sort_by_tags_should_make_last_tag_most_significant() {
    let mut list: Songlist = List::from(vec![
        Song::new("c.flac").with_tag("album", "B").with_tag("track", "2/9"),
        Song::new("a.flac").with_tag("album", "a").with_tag("track", "10"),
        Song::new("b.flac").with_tag("album", "B").with_tag("track", "1"),
        Song::new("d.flac").with_tag("track", "3"),
    ]);
    list.sort_by_tags(&["track".to_string(), "album".to_string()]);

    let uris: Vec<&str> = list.items().iter().map(|song| song.uri.as_str()).collect();
    assert_eq!(uris, vec!["d.flac", "a.flac", "b.flac", "c.flac"]);
}

#[test]
fn tag_names_should_include_file() {
    let list: Songlist = List::from(vec![
        Song::new("x").with_tag("artist", "A"),
        Song::new("y").with_tag("title", "T"),
    ]);
    assert_eq!(list.tag_names(), vec!["artist", "file", "title"]);
    assert_eq!(list.position_of("y"), Some(1));
}
