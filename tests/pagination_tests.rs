mod common;

use common::fixtures::*;
use common::*;
use folio::{
    BreakToken, ChannelTaskQueue, ColumnFlowOracle, DeferredTask, FlowAxis, LayoutConfig,
    LayoutEngine, LayoutError, Size, SizeChange, TaskQueue,
};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

#[test]
fn test_short_paragraphs_fill_ten_per_page() -> TestResult {
    let (mut engine, page) = column_engine(40, 10);
    let content = load(numbered_paragraphs(1, 500))?;

    let pages = paginate_all(&mut engine, &content, page, 100)?;
    assert_eq!(pages.len(), 50);

    let first: Vec<String> = (1..=10).map(|i| format!("p{}", i)).collect();
    assert_eq!(page_refs(&pages[0]), first);
    assert_eq!(pages[0].break_token, Some(BreakToken::at(node(&content, "p11"))));
    assert_eq!(page_refs(&pages[1])[0], "p11");
    assert_eq!(pages[1].break_token, Some(BreakToken::at(node(&content, "p21"))));

    let last = pages.last().ok_or("no pages")?;
    assert_eq!(last.break_token, None);
    assert_eq!(page_refs(last).last().map(String::as_str), Some("p500"));
    Ok(())
}

#[test]
fn test_long_paragraph_breaks_inside_its_text() -> TestResult {
    let (mut engine, page) = column_engine(166, 1);
    let content = load(vec![paragraph("p1", &words(60))])?;
    let text = content.first_child(node(&content, "p1")).ok_or("no text")?;

    let pages = paginate_all(&mut engine, &content, page, 10)?;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].break_token, Some(BreakToken::new(text, 164)));
    assert!(pages[0].text().ends_with("w41 "));
    assert!(pages[1].text().starts_with("w42 w43"));
    assert_eq!(page_refs(&pages[1]), vec!["p1"]);
    Ok(())
}

#[test]
fn test_page_break_marker_starts_a_new_page() -> TestResult {
    let (mut engine, page) = column_engine(40, 20);
    let mut nodes = numbered_paragraphs(1, 3);
    nodes.push(page_break("marker"));
    nodes.extend(numbered_paragraphs(4, 5));
    let content = load(nodes)?;

    let pages = paginate_all(&mut engine, &content, page, 10)?;
    assert_eq!(pages.len(), 2);
    assert_eq!(page_refs(&pages[0]), vec!["p1", "p2", "p3"]);
    assert_eq!(pages[0].break_token, Some(BreakToken::at(node(&content, "marker"))));
    assert_eq!(
        page_refs(&pages[1]),
        vec!["marker", "p4", "p5", "p6", "p7", "p8"]
    );
    Ok(())
}

#[test]
fn test_break_styles_from_json() -> TestResult {
    let (mut engine, page) = column_engine(40, 20);
    let content = load(vec![
        paragraph("p1", "one"),
        with_style(paragraph("p2", "two"), json!({ "break-after": "page" })),
        paragraph("p3", "three"),
        with_style(paragraph("p4", "four"), json!({ "break-before": "right" })),
        paragraph("p5", "five"),
    ])?;

    let pages = paginate_all(&mut engine, &content, page, 10)?;
    let refs: Vec<Vec<String>> = pages.iter().map(page_refs).collect();
    assert_eq!(refs, vec![vec!["p1", "p2"], vec!["p3"], vec!["p4", "p5"]]);
    Ok(())
}

#[test]
fn test_report_is_covered_without_loss_or_duplication() -> TestResult {
    let (mut engine, page) = column_engine(24, 6);
    let content = load(report(4, 5))?;

    let pages = paginate_all(&mut engine, &content, page, 500)?;
    assert!(pages.len() > 5, "only {} pages", pages.len());
    assert!(pages.last().is_some_and(|p| p.break_token.is_none()));
    assert_eq!(inked_pages(&pages), inked(&content.text_content(content.root())));

    for (i, page) in pages.iter().enumerate() {
        assert!(!inked(&page.text()).is_empty(), "page {} is empty", i + 1);
    }

    // A page resuming inside a chapter reopens that chapter as a continuation.
    let resumed = pages
        .iter()
        .skip(1)
        .find(|p| {
            p.tree
                .first_child(p.tree.root())
                .is_some_and(|first| p.tree.node(first).split_from)
        })
        .ok_or("no page resumes inside a chapter")?;
    assert!(page_refs(resumed)[0].starts_with("chapter"));
    Ok(())
}

#[test]
fn test_vertical_flow_from_json_config() -> TestResult {
    let config: LayoutConfig = serde_json::from_str(
        r#"{ "per-page-check": 1, "flow-axis": "vertical", "hyphen": null }"#,
    )?;
    assert_eq!(config.per_page_check, 1);
    assert_eq!(config.flow_axis, FlowAxis::Vertical);
    assert_eq!(config.hyphen, None);
    assert!(config.observe_resize);

    init_logger();
    let oracle = ColumnFlowOracle::vertical(20);
    let page = oracle.page_box_lines(5);
    let mut engine = LayoutEngine::new(Arc::new(oracle), config);
    let content = load(numbered_paragraphs(1, 12))?;

    let pages = paginate_all(&mut engine, &content, page, 10)?;
    assert_eq!(pages.len(), 3);
    assert_eq!(page_refs(&pages[1])[0], "p6");
    assert_eq!(page_refs(&pages[2]), vec!["p11", "p12"]);
    Ok(())
}

#[test]
fn test_resuming_from_a_saved_token() -> TestResult {
    let (mut engine, page) = column_engine(40, 10);
    let content = load(numbered_paragraphs(1, 500))?;

    let first = paginate_all(&mut engine, &content, page, 2)?;
    assert_eq!(first.len(), 2);
    let token = first[1].break_token.ok_or("content ended early")?;
    assert_eq!(token, BreakToken::at(node(&content, "p21")));

    let rest = paginate_from(&mut engine, &content, page, Some(token), 100)?;
    assert_eq!(rest.len(), 48);
    assert_eq!(page_refs(&rest[0])[0], "p21");
    Ok(())
}

#[test]
fn test_invalid_token_is_rejected_before_the_pass() -> TestResult {
    let (mut engine, page) = column_engine(40, 10);
    let content = load(numbered_paragraphs(1, 3))?;
    let text = content.first_child(node(&content, "p1")).ok_or("no text")?;

    let err = paginate_from(&mut engine, &content, page, Some(BreakToken::new(text, 50)), 10)
        .unwrap_err();
    assert!(matches!(err, LayoutError::OffsetOutOfBounds { offset: 50, len: 11, .. }));
    assert!(engine.destination().is_empty());
    Ok(())
}

#[test]
fn test_size_changes_from_another_thread() -> TestResult {
    init_logger();
    let queue = ChannelTaskQueue::new();
    let oracle = ColumnFlowOracle::new(20, 10);
    let page = oracle.page_box();
    let mut engine = LayoutEngine::new(Arc::new(oracle), LayoutConfig::default())
        .with_task_queue(Arc::new(queue.clone()));
    let underflows = Rc::new(Cell::new(0));
    let u = underflows.clone();
    engine.on_underflow(move || u.set(u.get() + 1));

    let mut nodes = vec![paragraph("p1", "Paragraph 1"), figure("img", 1)];
    nodes.extend(numbered_paragraphs(2, 5));
    let content = load(nodes)?;

    assert_eq!(engine.layout(page, &content, None)?, None);
    assert_eq!(queue.len(), 1);

    let producer = queue.clone();
    std::thread::spawn(move || {
        producer.schedule(DeferredTask::SizeChanged(SizeChange {
            size: Size::new(20.0, 4.0),
        }))
    })
    .join()
    .map_err(|_| "producer panicked")??;

    assert_eq!(underflows.get(), 0);
    assert_eq!(engine.run_pending()?, 2);
    assert!(engine.is_listening());
    assert_eq!(underflows.get(), 1);
    assert!(queue.is_empty());
    Ok(())
}

#[test]
fn test_hooks_observe_every_page() -> TestResult {
    let (mut engine, page) = column_engine(40, 10);
    let overflows = Rc::new(Cell::new(0));
    let c = overflows.clone();
    engine.hooks_mut().on_overflow(move |_, _| c.set(c.get() + 1));
    let content = load(numbered_paragraphs(1, 35))?;

    let pages = paginate_all(&mut engine, &content, page, 10)?;
    assert_eq!(pages.len(), 4);
    // The last page fits; every other page located exactly one overflow.
    assert_eq!(overflows.get(), 3);
    Ok(())
}
