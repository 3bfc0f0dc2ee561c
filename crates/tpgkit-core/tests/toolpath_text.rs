use tpgkit_core::{MotionKind, Toolpath, ToolpathError, ToolpathSink};

const SQUARE: [&str; 7] = [
    "rapid(0,0,0.1)",
    "feed(0,0,-0.5)",
    "feed(1,0,-0.5)",
    "feed(1,1,-0.5)",
    "feed(0,1,-0.5)",
    "feed(0,0,-0.5)",
    "rapid(0,0,0.1)",
];

#[test]
fn test_parse_host_text_form() {
    let tp = Toolpath::from_text_lines(SQUARE).unwrap();
    assert_eq!(tp.len(), 7);
    assert_eq!(tp.primitives[0].kind, MotionKind::Rapid);
    assert_eq!(tp.primitives[3].x, 1.0);
    assert_eq!(tp.primitives[3].y, 1.0);
    assert_eq!(tp.to_text_lines(), SQUARE);
}

#[test]
fn test_unit_square_feed_length() {
    let tp = Toolpath::from_text_lines(SQUARE).unwrap();
    // four sides of the square plus the plunge
    assert!((tp.feed_length() - 4.6).abs() < 1e-9);
}

#[test]
fn test_blank_lines_skipped() {
    let tp = Toolpath::from_text_lines(["", "feed(0,0,0)", "   "]).unwrap();
    assert_eq!(tp.len(), 1);
}

#[test]
fn test_bad_line_reported() {
    let err = Toolpath::from_text_lines(["rapid(0,0,0)", "arc(1,1,1)"]).unwrap_err();
    assert_eq!(
        err,
        ToolpathError::UnknownMotionKind {
            kind: "arc".to_string()
        }
    );
}

#[test]
fn test_sink_through_trait_object() {
    let mut tp = Toolpath::new();
    {
        let sink: &mut dyn ToolpathSink = &mut tp;
        sink.rapid(0.0, 0.0, 0.1);
        sink.feed(0.0, 0.0, -0.5);
    }
    assert_eq!(tp.to_text_lines(), vec!["rapid(0,0,0.1)", "feed(0,0,-0.5)"]);
}
