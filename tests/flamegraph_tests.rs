use trace2_flamegraph::aggregator::stack_builder::{extract_regions, Extraction, HelperFilter, Rectangle};
use trace2_flamegraph::flamegraph::generator::{shade_ratio, TimeScale};
use trace2_flamegraph::flamegraph::{generate_flamegraph, FlamegraphConfig};
use trace2_flamegraph::parser::{parse_events, TraceEvent};

fn render(events: &[TraceEvent]) -> String {
    let extraction = extract_regions(events, &HelperFilter::default()).unwrap();
    generate_flamegraph(&extraction, None)
}

#[test]
fn test_scale_tiers() {
    let short = TimeScale::for_duration(500);
    assert_eq!(short.unit, "ms");
    assert_eq!(short.width_divisor, 1.0);
    assert_eq!(short.interval, 100);

    let medium = TimeScale::for_duration(3000);
    assert_eq!(medium.unit, "s");
    assert_eq!(medium.interval, 1000);
    assert_eq!(medium.width_divisor, 10.0);

    let long = TimeScale::for_duration(20_000);
    assert_eq!(long.unit, "s");
    assert_eq!(long.interval, 5000);
    assert_eq!(long.width_divisor, 50.0);
}

#[test]
fn test_document_layout() {
    let svg = render(&[
        TraceEvent::start(0, &["git", "status"]),
        TraceEvent::enter(0),
        TraceEvent::leave(50, "progress", "scan"),
        TraceEvent::exit(50),
    ]);

    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="50" height="170">"#));
    assert!(svg.contains(".box { font: 16px sans-serif; }"));
    assert!(svg.contains(".axis { font: 12px sans-serif; }"));
    assert!(svg.contains(r#"<line x1="0" y1="0" x2="0" y2="170" style="stroke-width:1; stroke:black;" />"#));
    assert!(svg.contains(r#"<text class="axis" x="3" y="10">0ms</text>"#));

    // Depth 0 on the bottom row, unshaded
    assert!(svg.contains(
        r#"<rect width="50.00" height="50" x="0.00" y="110.00" style="fill:rgb(150,50,50);stroke-width:3;stroke:rgb(0,0,0)" />"#
    ));
    assert!(svg.contains(r#"<text class="box" x="5.00" y="150.00">git status</text>"#));

    // Deepest row gets the full shade
    assert!(svg.contains(
        r#"<rect width="50.00" height="50" x="0.00" y="60.00" style="fill:rgb(250,83,83);stroke-width:3;stroke:rgb(100,100,100)" />"#
    ));
    assert!(svg.contains(r#"<text class="box" x="5.00" y="100.00">progress:scan</text>"#));

    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_grid_is_drawn_before_rectangles() {
    let svg = render(&[
        TraceEvent::start(0, &["git", "status"]),
        TraceEvent::exit(450),
    ]);

    let last_line = svg.rfind("<line").unwrap();
    let first_rect = svg.find("<rect").unwrap();
    assert!(last_line < first_rect);

    // 0, 100, 200, 300, 400
    assert_eq!(svg.matches("<line").count(), 5);
    assert!(svg.contains(">400ms</text>"));
}

#[test]
fn test_grid_labels_in_seconds() {
    let svg = render(&[
        TraceEvent::start(0, &["git", "gc"]),
        TraceEvent::exit(20_000),
    ]);

    // Every 5s, 50ms per pixel
    assert_eq!(svg.matches("<line").count(), 4);
    assert!(svg.contains(r#"<text class="axis" x="103" y="10">5s</text>"#));
    assert!(svg.contains(r#"width="400" height="120""#));
}

#[test]
fn test_narrow_rectangles_are_skipped() {
    let svg = render(&[
        TraceEvent::start(0, &["git", "status"]),
        TraceEvent::enter(100),
        TraceEvent::leave(105, "tiny", "blip"),
        TraceEvent::enter(200),
        TraceEvent::leave(250, "index", "refresh"),
        TraceEvent::exit(500),
    ]);

    assert!(!svg.contains("tiny:blip"));
    assert!(svg.contains("index:refresh"));
    assert!(svg.contains("git status"));
}

#[test]
fn test_threshold_applies_after_scaling() {
    // 400ms lasts 8px once a 20s trace is compressed 50x
    let svg = render(&[
        TraceEvent::start(0, &["git", "fetch"]),
        TraceEvent::enter(1000),
        TraceEvent::leave(1400, "net", "negotiate"),
        TraceEvent::exit(20_000),
    ]);

    assert!(!svg.contains("net:negotiate"));
}

#[test]
fn test_custom_min_width() {
    let events = [
        TraceEvent::start(0, &["git", "status"]),
        TraceEvent::enter(100),
        TraceEvent::leave(105, "tiny", "blip"),
        TraceEvent::exit(500),
    ];
    let extraction = extract_regions(&events, &HelperFilter::default()).unwrap();
    let config = FlamegraphConfig::new().with_min_width(1.0);

    let svg = generate_flamegraph(&extraction, Some(&config));
    assert!(svg.contains("tiny:blip"));
}

#[test]
fn test_merged_label_shows_count() {
    let svg = render(&[
        TraceEvent::start(0, &["git", "fetch"]),
        TraceEvent::enter(0),
        TraceEvent::leave(10, "net", "fetch"),
        TraceEvent::enter(10),
        TraceEvent::leave(20, "net", "fetch"),
        TraceEvent::enter(20),
        TraceEvent::leave(30, "net", "fetch"),
        TraceEvent::exit(30),
    ]);

    assert!(svg.contains(">net:fetch (3)</text>"));
    assert_eq!(svg.matches("net:fetch").count(), 1);
}

#[test]
fn test_flat_trace_has_defined_shade() {
    assert_eq!(shade_ratio(0, 0), 0.0);
    assert_eq!(shade_ratio(2, 4), 0.5);

    let svg = render(&[
        TraceEvent::start(0, &["git", "version"]),
        TraceEvent::exit(40),
    ]);

    assert!(!svg.contains("NaN"));
    assert!(svg.contains("fill:rgb(150,50,50);stroke-width:3;stroke:rgb(0,0,0)"));
    assert!(svg.contains(r#"height="120""#));
}

#[test]
fn test_zero_duration_trace() {
    let extraction = Extraction {
        rectangles: vec![Rectangle::new("git version", 0, 0, 0)],
        start_ms: 0,
        total_duration_ms: 0,
        max_depth: 0,
        max_nesting: 1,
        excluded: 0,
        mismatched: 0,
    };

    let svg = generate_flamegraph(&extraction, None);

    assert!(!svg.contains("NaN"));
    assert!(!svg.contains("<line"));
    assert!(!svg.contains("<rect"));
}

#[test]
fn test_labels_are_escaped() {
    let svg = render(&[
        TraceEvent::start(0, &["git", "log", "--format=<%h>"]),
        TraceEvent::exit(100),
    ]);

    assert!(svg.contains("git log --format=&lt;%h&gt;"));
}

#[test]
fn test_pipeline_from_trace_text() {
    let text = r#"{"event":"version","sid":"1","thread":"main","time":"2024-03-01T10:00:00.000000Z","evt":"3","exe":"2.44.0"}
{"event":"start","sid":"1","thread":"main","time":"2024-03-01T10:00:00.000000Z","t_abs":0.0,"argv":["git","status"]}
{"event":"cmd_name","sid":"1","thread":"main","time":"2024-03-01T10:00:00.001000Z","name":"status"}
{"event":"region_enter","sid":"1","thread":"main","time":"2024-03-01T10:00:00.010000Z","nesting":1,"category":"index","label":"do_read_index"}
{"event":"region_leave","sid":"1","thread":"main","time":"2024-03-01T10:00:00.090000Z","t_rel":0.08,"nesting":1,"category":"index","label":"do_read_index"}
{"event":"exit","sid":"1","thread":"main","time":"2024-03-01T10:00:00.200000Z","t_abs":0.2,"code":0}
{"event":"atexit","sid":"1","thread":"main","time":"2024-03-01T10:00:00.200500Z","t_abs":0.2005,"code":0}
"#;

    let events = parse_events(text).unwrap();
    assert_eq!(events.len(), 4);

    let svg = render(&events);
    assert!(svg.contains(r#"width="200""#));
    assert!(svg.contains(r#"x="10.00""#));
    assert!(svg.contains(">index:do_read_index</text>"));
    assert!(svg.contains(">git status</text>"));
}
