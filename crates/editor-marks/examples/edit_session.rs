use editor_marks::{Document, FOLD_LEVEL_BASE, FOLD_LEVEL_HEADER_FLAG};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .init();

    let mut doc = Document::new("fn main() {\n    let x = 1;\n}\n");

    // A breakpoint on the body line and a fold header on line 0.
    let breakpoint = doc.add_marker(1, 2).unwrap();
    doc.set_fold_level(0, FOLD_LEVEL_BASE | FOLD_LEVEL_HEADER_FLAG, 1);
    doc.set_fold_level(1, FOLD_LEVEL_BASE + 1, 2);

    // Underline `x` with indicator 8.
    doc.decorations_mut().set_current_indicator(8);
    doc.decorations_mut().fill_range(20, 1, 1);

    // Insert a line above the body.
    doc.insert_text(doc.line_start(1), "    // setup\n").unwrap();
    assert_eq!(doc.markers().line_from_handle(breakpoint), Some(2));
    assert_eq!(doc.decorations().value_at(8, 33), 1);

    // Join the comment line with the body.
    let join_at = doc.line_start(2) - 1;
    doc.delete_range(join_at, 1).unwrap();
    assert_eq!(doc.markers().line_from_handle(breakpoint), Some(1));

    println!("{}", doc.text());
}
