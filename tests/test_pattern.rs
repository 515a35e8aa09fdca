use rat_mask::core::{MaskBuffer, Pattern, PatternSlot};
use rat_mask::format_char::{FnFormat, FormatCharacters};
use rat_mask::mask_op::{clear_range, insert_char, paste, remove_next, remove_prev, snap_caret};
use rat_mask::{MaskError, Selection};

fn pattern(mask: &str) -> Pattern {
    Pattern::compile(mask, &FormatCharacters::default()).expect("mask")
}

#[test]
fn test_compile() {
    let p = pattern("99/99/9999");
    assert_eq!(p.len(), 10);
    assert_eq!(p.mask(), "99/99/9999");
    assert_eq!(p.editable_count(), 8);
    assert_eq!(p.first_editable(), 0);
    assert_eq!(p.last_editable(), 9);
    assert!(p.is_editable(0));
    assert!(!p.is_editable(2));
    assert!(!p.is_editable(10));
    assert_eq!(p.literal_at(2), Some('/'));
    assert_eq!(p.literal_at(0), None);
    assert_eq!(
        p.editable_indices().collect::<Vec<_>>(),
        vec![0, 1, 3, 4, 6, 7, 8, 9]
    );

    let s = p.slots().iter().map(|v| v.to_string()).collect::<String>();
    assert_eq!(s, "99/99/9999");
    assert!(matches!(p.slot(2), Some(PatternSlot::Literal('/'))));
    assert!(matches!(
        p.slot(0),
        Some(PatternSlot::Editable { trigger: '9', .. })
    ));
}

#[test]
fn test_compile_escape() {
    let p = pattern("+\\1 (999)");
    assert_eq!(p.len(), 8);
    assert_eq!(p.literal_at(0), Some('+'));
    assert_eq!(p.literal_at(1), Some('1'));
    assert_eq!(p.first_editable(), 4);
    assert_eq!(p.last_editable(), 6);

    let p = pattern("9\\\\9");
    assert_eq!(p.len(), 3);
    assert_eq!(p.literal_at(1), Some('\\'));
}

#[test]
fn test_compile_errors() {
    let f = FormatCharacters::default();
    assert_eq!(
        Pattern::compile("", &f).err(),
        Some(MaskError::InvalidPattern("".into()))
    );
    assert_eq!(
        Pattern::compile("99\\", &f).err(),
        Some(MaskError::InvalidPattern("99\\".into()))
    );
    assert!(Pattern::compile("(---)", &f).is_err());
    assert!(Pattern::compile("99", &FormatCharacters::empty()).is_err());
    assert_eq!(
        format!("{}", MaskError::InvalidPattern("x".into())),
        "InvalidPattern(\"x\")"
    );
}

#[test]
fn test_navigation() {
    let p = pattern("(99) 99");
    assert_eq!(p.next_editable(0), Some(1));
    assert_eq!(p.next_editable(3), Some(5));
    assert_eq!(p.next_editable(7), None);
    assert_eq!(p.prev_editable(5), Some(2));
    assert_eq!(p.prev_editable(1), None);
    assert_eq!(p.prev_editable(100), Some(6));
    assert_eq!(p.skip_literals(3), 5);
    assert_eq!(p.skip_literals(7), 7);
}

#[test]
fn test_custom_format() {
    fn hex(c: char) -> bool {
        c.is_ascii_hexdigit()
    }
    let f = FormatCharacters::default()
        .with('h', FnFormat::new(hex).with_transform(|c| c.to_ascii_uppercase()));
    let p = Pattern::compile("hh:hh", &f).expect("mask");
    assert!(p.is_valid_at('f', 0));
    assert!(!p.is_valid_at('g', 0));
    assert!(!p.is_valid_at(':', 2));
    assert_eq!(p.transform_at('f', 0), 'F');

    let mut b = MaskBuffer::new(&p, '_');
    b.set_value(&p, "ff:0a");
    assert_eq!(b.value(), "FF:0A");
}

#[test]
fn test_buffer() {
    let p = pattern("99/99");
    let mut b = MaskBuffer::new(&p, '_');
    assert_eq!(b.len(), 5);
    assert_eq!(b.value(), "__/__");
    assert_eq!(b.get(2), Some('/'));
    assert_eq!(b.get(0), None);
    assert!(b.is_clear(&p));
    assert_eq!(b.last_filled(&p), None);

    b.set_value(&p, "1_/3");
    assert_eq!(b.value(), "1_/3_");
    assert_eq!(b.raw_value(&p), "1_/3");
    assert_eq!(b.filled_count(&p), 2);
    assert_eq!(b.last_filled(&p), Some(3));
    assert!(b.is_filled(&p, 0));
    assert!(!b.is_filled(&p, 1));
    assert!(!b.is_filled(&p, 2));

    b.clear(&p);
    assert_eq!(b, MaskBuffer::new(&p, '_'));
}

#[test]
fn test_buffer_other_pattern() {
    let short = pattern("99");
    let long = pattern("9999");

    let mut b = MaskBuffer::new(&short, '_');
    b.set_value(&long, "1234");
    assert_eq!(b.value(), "12");
    assert_eq!(b.raw_value(&long), "12");

    b.clear(&long);
    assert_eq!(b.value(), "__");

    let mut b = MaskBuffer::with_value(&long, '_', "1234");
    b.set_value(&short, "9");
    assert_eq!(b.value(), "9_34");
}

#[test]
fn test_buffer_placeholder_valid() {
    // the placeholder is accepted by '*', but still means empty.
    let p = pattern("***");
    let mut b = MaskBuffer::new(&p, 'x');
    b.set_value(&p, "axb");
    assert_eq!(b.value(), "axb");
    assert_eq!(b.filled_count(&p), 2);
    assert!(!b.is_complete(&p));
}

#[test]
fn test_remap() {
    let old = pattern("99/99/9999");
    let new = pattern("9999-99-99");
    let b = MaskBuffer::with_value(&old, '_', "12/31/2024");
    let r = b.remap(&old, &new);
    assert_eq!(r.value(), "1231-20-24");
    assert_eq!(r.placeholder(), '_');
}

#[test]
fn test_ops() {
    let p = pattern("99-99");
    let mut b = MaskBuffer::new(&p, '_');

    let r = insert_char(&p, &mut b, Selection::caret(0), '1');
    assert!(r.accepted);
    assert_eq!(r.selection, Selection::caret(1));
    let r = insert_char(&p, &mut b, r.selection, '2');
    assert_eq!(r.selection, Selection::caret(3));
    assert_eq!(b.value(), "12-__");

    let r = insert_char(&p, &mut b, r.selection, '-');
    assert!(!r.accepted);
    assert_eq!(r.selection, Selection::caret(3));

    let r = paste(&p, &mut b, Selection::caret(3), "34");
    assert!(r.accepted);
    assert_eq!(r.selection, Selection::caret(5));
    assert_eq!(b.value(), "12-34");

    let r = remove_prev(&p, &mut b, Selection::caret(3));
    assert_eq!(r.selection, Selection::caret(1));
    assert_eq!(b.value(), "1_-34");

    let r = remove_next(&p, &mut b, Selection::caret(2));
    assert_eq!(r.selection, Selection::caret(4));
    assert_eq!(b.value(), "1_-_4");

    assert!(clear_range(&p, &mut b, Selection::new(0, 5)));
    assert_eq!(b.value(), "__-__");
    assert!(!clear_range(&p, &mut b, Selection::new(0, 5)));
}

#[test]
fn test_ops_out_of_range() {
    let p = pattern("99-99");
    let mut b = MaskBuffer::with_value(&p, '_', "12-34");

    let r = remove_prev(&p, &mut b, Selection::new(3, 50));
    assert!(r.accepted);
    assert_eq!(r.selection, Selection::caret(3));
    assert_eq!(b.value(), "12-__");

    let r = insert_char(&p, &mut b, Selection::caret(50), '1');
    assert!(!r.accepted);
    assert_eq!(r.selection, Selection::caret(50));
}

#[test]
fn test_paste_graphemes() {
    let p = pattern("***");
    let mut b = MaskBuffer::new(&p, '_');
    // e + combining acute is one grapheme of two chars.
    let r = paste(&p, &mut b, Selection::caret(0), "ae\u{301}b");
    assert!(r.accepted);
    assert_eq!(b.value(), "a__");
    assert_eq!(r.selection, Selection::caret(1));
}

#[test]
fn test_snap() {
    let p = pattern("99-99");
    let b = MaskBuffer::with_value(&p, '_', "1");
    assert_eq!(snap_caret(&p, &b, Selection::caret(4)), Selection::caret(1));
    assert_eq!(snap_caret(&p, &b, Selection::caret(1)), Selection::caret(1));
    assert_eq!(snap_caret(&p, &b, Selection::new(1, 4)), Selection::new(1, 4));
}
