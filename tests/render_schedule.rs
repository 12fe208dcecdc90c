//! End-to-end rendering properties of the direct backend

use daygrid::{
    ColumnResolver, Document, Error, Event, LayoutSlot, NodeId, Schedule, ScheduleConfig,
};

fn translate(doc: &Document, node: NodeId) -> (f64, f64) {
    let t = doc.attribute(node, "transform").expect("transform");
    let inner = t
        .strip_prefix("translate(")
        .and_then(|s| s.strip_suffix(')'))
        .expect("translate()");
    let (x, y) = inner.split_once(',').expect("x,y");
    (x.parse().unwrap(), y.parse().unwrap())
}

fn number(doc: &Document, node: NodeId, name: &str) -> f64 {
    doc.attribute(node, name).expect(name).parse().unwrap()
}

fn event_groups(doc: &Document, schedule: &Schedule) -> Vec<NodeId> {
    doc.children(schedule.surface().events_layer()).to_vec()
}

fn slot(id: usize, width_multiplier: u32, offset: u32) -> LayoutSlot {
    LayoutSlot {
        id,
        width_multiplier,
        offset,
    }
}

#[test]
fn vertical_geometry_follows_canvas_height() {
    for height in [720u32, 700, 1000] {
        let mut doc = Document::new();
        let config = ScheduleConfig {
            height,
            ..Default::default()
        };
        let mut schedule = Schedule::new(&mut doc, &config).unwrap();
        let body = doc.body();
        let events = vec![Event::new(0, 60), Event::new(95, 37), Event::new(601, 119)];
        let slots: Vec<_> = (0..events.len()).map(|i| slot(i, 1, 0)).collect();
        schedule.render_slots(&mut doc, &events, &slots, body).unwrap();

        let h = height as f64;
        for (group, event) in event_groups(&doc, &schedule).into_iter().zip(&events) {
            let (_, y) = translate(&doc, group);
            assert_eq!(y, h / 12.0 / 60.0 * event.starts_at as f64);
            let block = doc.children(group)[0];
            assert_eq!(number(&doc, block, "height"), h / 12.0 / 60.0 * event.duration as f64);
        }
    }
}

#[test]
fn horizontal_geometry_follows_layout_slot() {
    let event_width = 580.0;
    for m in 1u32..=5 {
        let mut doc = Document::new();
        let mut schedule = Schedule::new(&mut doc, &ScheduleConfig::default()).unwrap();
        let body = doc.body();
        let events: Vec<_> = (0..m).map(|_| Event::new(0, 60)).collect();
        let slots: Vec<_> = (0..m).map(|k| slot(k as usize, m, k)).collect();
        schedule.render_slots(&mut doc, &events, &slots, body).unwrap();

        for (k, group) in event_groups(&doc, &schedule).into_iter().enumerate() {
            let width = event_width / m as f64;
            let (x, _) = translate(&doc, group);
            assert_eq!(x, k as f64 * width);
            assert_eq!(number(&doc, doc.children(group)[0], "width"), width);
        }
    }
}

#[test]
fn placeholders_produce_no_output() {
    let mut doc = Document::new();
    let mut schedule = Schedule::new(&mut doc, &ScheduleConfig::default()).unwrap();
    let body = doc.body();
    let events = vec![
        Event::new(0, 60).with_title("real"),
        Event::new(0, 60).with_title("ghost").placeholder(),
    ];
    schedule.render(&mut doc, &events, &ColumnResolver, body).unwrap();

    let groups = event_groups(&doc, &schedule);
    assert_eq!(groups.len(), 1);
    assert_eq!(doc.find_all(schedule.root(), "clipPath").len(), 1);
    // the placeholder still claims a column
    assert_eq!(number(&doc, doc.children(groups[0])[0], "width"), 290.0);
    assert!(!doc.text_content(schedule.root()).contains("ghost"));
}

#[test]
fn repeated_renders_clear_events_and_keep_one_grid() {
    let mut doc = Document::new();
    let mut schedule = Schedule::new(&mut doc, &ScheduleConfig::default()).unwrap();
    let body = doc.body();

    schedule
        .render(&mut doc, &[Event::new(0, 60).with_title("old")], &ColumnResolver, body)
        .unwrap();
    schedule
        .render(&mut doc, &[Event::new(120, 60).with_title("new")], &ColumnResolver, body)
        .unwrap();

    let text = doc.text_content(schedule.surface().events_layer());
    assert!(text.contains("new"));
    assert!(!text.contains("old"));
    assert_eq!(doc.text_content(schedule.root()).matches("9 AM").count(), 1);
    assert_eq!(doc.find_all(body, "svg").len(), 1);
}

#[test]
fn title_composition() {
    let cases = [
        (Event::new(0, 60).with_title("Standup"), Some("Standup")),
        (Event::new(0, 60).with_location("Room 2"), Some("Room 2")),
        (
            Event::new(0, 60).with_title("Standup").with_location("Room 2"),
            Some("Standup/Room 2"),
        ),
        (Event::new(0, 60), None),
    ];
    for (event, expected) in cases {
        let mut doc = Document::new();
        let mut schedule = Schedule::new(&mut doc, &ScheduleConfig::default()).unwrap();
        let body = doc.body();
        schedule.render(&mut doc, &[event], &ColumnResolver, body).unwrap();

        let group = event_groups(&doc, &schedule)[0];
        let spans = doc.find_all(group, "tspan");
        match expected {
            Some(heading) => {
                assert_eq!(spans.len(), 2);
                assert_eq!(doc.text_content(spans[0]), heading);
                assert_eq!(doc.attribute(spans[0], "style"), Some("font-weight: bold;"));
                assert_eq!(doc.attribute(spans[1], "dy"), Some("0.9em"));
            }
            None => {
                assert_eq!(spans.len(), 1);
                assert_eq!(doc.attribute(spans[0], "dy"), Some("0.35em"));
            }
        }
    }
}

#[test]
fn time_labels_keep_unpadded_minutes() {
    let mut doc = Document::new();
    let mut schedule = Schedule::new(&mut doc, &ScheduleConfig::default()).unwrap();
    let body = doc.body();
    let events = vec![Event::new(65, 10), Event::new(780, 60)];
    let slots = [slot(0, 1, 0), slot(1, 1, 0)];
    schedule.render_slots(&mut doc, &events, &slots, body).unwrap();

    let groups = event_groups(&doc, &schedule);
    assert_eq!(doc.text_content(groups[0]), "10:5 AM – 10:15 AM");
    assert_eq!(doc.text_content(groups[1]), "10 PM – 11 PM");
}

#[test]
fn two_overlapping_events_render_side_by_side() {
    let mut doc = Document::new();
    let mut schedule = Schedule::new(&mut doc, &ScheduleConfig::default()).unwrap();
    let body = doc.body();
    let events: Vec<Event> = serde_json::from_str(
        r#"[{"starts_at":0,"duration":60,"title":"A"},{"starts_at":30,"duration":60,"title":"B"}]"#,
    )
    .unwrap();
    schedule.render(&mut doc, &events, &ColumnResolver, body).unwrap();

    let groups = event_groups(&doc, &schedule);
    assert_eq!(groups.len(), 2);
    let (ax, ay) = translate(&doc, groups[0]);
    let (bx, by) = translate(&doc, groups[1]);
    let a_block = doc.children(groups[0])[0];
    let b_block = doc.children(groups[1])[0];

    assert_eq!((ax, bx), (0.0, 290.0));
    assert_eq!(number(&doc, a_block, "width"), 290.0);
    assert_eq!(number(&doc, b_block, "width"), 290.0);
    // spans overlap between minute 30 and minute 60
    assert_eq!((ay, ay + number(&doc, a_block, "height")), (0.0, 60.0));
    assert_eq!((by, by + number(&doc, b_block, "height")), (30.0, 90.0));
}

#[test]
fn correlation_mismatch_is_surfaced() {
    let mut doc = Document::new();
    let mut schedule = Schedule::new(&mut doc, &ScheduleConfig::default()).unwrap();
    let body = doc.body();
    let err = schedule
        .render_slots(&mut doc, &[Event::new(0, 10)], &[], body)
        .unwrap_err();
    assert!(matches!(err, Error::CorrelationError(_)));
}
