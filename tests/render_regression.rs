//! Render Regression Tests
//!
//! Lays out a small three-well site, checks the section geometry against
//! hand-computed elevations, and writes PNG/SVG output into a temp directory.

use borehole_log::render::Point;
use borehole_log::{
    plot_section, plot_well, Color, LithologyStyle, RenderError, SectionOptions, StyleTable, Well,
    WellInfo, WellPlotOptions,
};
use std::sync::Once;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Three boreholes along an easting line, the middle one empty.
fn site() -> Vec<Well> {
    let mut bh1 = Well::new(
        WellInfo::named("BH 1")
            .at(0.0, 0.0)
            .with_elevation(100.0),
    );
    bh1.add_interval(0.0, 0.5, "Fill", "gravelly fill");
    bh1.add_interval(0.5, 2.0, "Clay", "brown, firm");
    bh1.add_interval(2.0, 6.0, "Till", "dense, grey");

    let bh2 = Well::new(WellInfo::named("BH 2").at(20.0, 0.0).with_elevation(99.0));

    let mut bh3 = Well::new(WellInfo::named("BH 3").at(45.0, 0.0).with_elevation(97.5));
    bh3.add_interval(0.0, 1.0, "Clay", "");
    bh3.add_interval(1.0, 3.0, "Silt", "");
    bh3.add_interval(3.0, 4.0, "Bedrock", "weathered");

    vec![bh1, bh2, bh3]
}

/// Options scaled down so raster output stays small.
fn small_section() -> SectionOptions {
    SectionOptions {
        dpi: 20.0,
        ..SectionOptions::default()
    }
}

// ============================================================================
// Section geometry
// ============================================================================

#[test]
fn section_spans_equal_elevation_minus_depth() {
    init_tracing();
    let wells = site();
    let fig = plot_section(&wells, &StyleTable::standard(), &small_section()).unwrap();

    // BH 1 at 100.0, then BH 3 at 97.5; BH 2 has no intervals
    let expected = vec![
        (99.5, 100.0),
        (98.0, 99.5),
        (94.0, 98.0),
        (96.5, 97.5),
        (94.5, 96.5),
        (93.5, 94.5),
    ];
    let spans: Vec<(f64, f64)> = fig.patches.iter().map(|p| p.vertical_span()).collect();
    assert_eq!(spans, expected);
}

#[test]
fn section_single_clay_scenario() {
    let mut well = Well::new(WellInfo::default().with_elevation(100.0));
    well.add_interval(0.0, 2.0, "Clay", "");
    let fig = plot_section(&[well], &StyleTable::standard(), &small_section()).unwrap();
    assert_eq!(fig.patches.len(), 1);
    assert_eq!(fig.patches[0].vertical_span(), (98.0, 100.0));
}

#[test]
fn section_labels_every_well_including_empty() {
    let fig = plot_section(&site(), &StyleTable::standard(), &small_section()).unwrap();
    let names: Vec<&str> = fig.texts.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(names, vec!["BH 1", "BH 2", "BH 3"]);
    assert_eq!(fig.texts[1].anchor, Point::new(22.5, 100.5));
}

#[test]
fn section_legend_first_seen_order() {
    let fig = plot_section(&site(), &StyleTable::standard(), &small_section()).unwrap();
    let legend = fig.legend.unwrap();
    assert_eq!(legend.labels(), vec!["Fill", "Clay", "Till", "Silt", "Bedrock"]);
}

#[test]
fn legend_dedup_over_repeated_lithologies() {
    let mut well = Well::new(WellInfo::default());
    well.add_interval(0.0, 1.0, "Clay", "");
    well.add_interval(1.0, 2.0, "Silt", "");
    well.add_interval(2.0, 3.0, "Clay", "");
    well.add_interval(3.0, 4.0, "Till", "");

    let opts = WellPlotOptions {
        legend: true,
        ..WellPlotOptions::default()
    };
    let fig = plot_well(&well, &StyleTable::standard(), &opts).unwrap();
    assert_eq!(fig.legend.unwrap().labels(), vec!["Clay", "Silt", "Till"]);
}

// ============================================================================
// Lookup failures
// ============================================================================

#[test]
fn unknown_lithology_fails_before_any_output() {
    let mut well = Well::new(WellInfo::named("BH X"));
    well.add_interval(0.0, 1.0, "Clay", "");
    well.add_interval(1.0, 2.0, "Granite", "");

    let opts = WellPlotOptions {
        save: true,
        ..WellPlotOptions::default()
    };
    let result = plot_well(&well, &StyleTable::standard(), &opts);
    match result {
        Err(RenderError::UnknownLithology(name)) => assert_eq!(name, "Granite"),
        other => panic!("expected UnknownLithology, got {other:?}"),
    }
}

#[test]
fn synthetic_style_table_renders_custom_lithology() {
    let styles = StyleTable::empty().with_style(
        "Granite",
        LithologyStyle::new(Color::rgb(200, 120, 120), "++", 1.0),
    );
    let mut well = Well::new(WellInfo::named("BH X"));
    well.add_interval(0.0, 1.0, "Granite", "");

    let fig = plot_well(&well, &styles, &WellPlotOptions::default()).unwrap();
    assert_eq!(fig.patches[0].color, Color::rgb(200, 120, 120));

    // The standard table is not consulted
    assert!(plot_well(&well, &StyleTable::standard(), &WellPlotOptions::default()).is_err());
}

#[test]
fn invalid_options_are_rejected() {
    let opts = SectionOptions {
        bar_width: -1.0,
        ..SectionOptions::default()
    };
    let err = plot_section(&site(), &StyleTable::standard(), &opts).unwrap_err();
    assert!(matches!(err, RenderError::InvalidOptions(_)));
}

// ============================================================================
// Output files
// ============================================================================

#[test]
fn well_log_save_writes_png_named_after_well() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let wells = site();
    let opts = WellPlotOptions {
        save: true,
        legend: true,
        description: false,
        title: Some("overridden".to_string()),
        dpi: 40.0,
        ..WellPlotOptions::default()
    };

    let fig = plot_well(&wells[0], &StyleTable::standard(), &opts).unwrap();
    let path = fig.finish(dir.path()).unwrap().unwrap();

    assert_eq!(path, dir.path().join("BH_1.png"));
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (80, 480));
}

#[test]
fn descriptions_widen_the_saved_log() {
    let dir = tempfile::tempdir().unwrap();
    let opts = WellPlotOptions {
        save: true,
        dpi: 40.0,
        ..WellPlotOptions::default()
    };
    let fig = plot_well(&site()[0], &StyleTable::standard(), &opts).unwrap();
    let img = image::open(fig.save(dir.path()).unwrap()).unwrap();
    assert!(img.width() > 80);
    assert_eq!(img.height(), 480);
}

#[test]
fn finish_without_save_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let fig = plot_well(&site()[0], &StyleTable::standard(), &WellPlotOptions::default()).unwrap();
    assert_eq!(fig.finish(dir.path()).unwrap(), None);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn section_save_uses_title() {
    let dir = tempfile::tempdir().unwrap();
    let opts = SectionOptions {
        title: "Line A to B".to_string(),
        save: true,
        ..small_section()
    };
    let fig = plot_section(&site(), &StyleTable::standard(), &opts).unwrap();
    let path = fig.finish(dir.path()).unwrap().unwrap();
    assert_eq!(path.file_name().unwrap(), "Line_A_to_B.png");

    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (300, 240));
}

// ============================================================================
// Raster text
// ============================================================================

/// Two single-interval wells that differ only in their description text.
fn described(description: &str) -> Well {
    let mut well = Well::new(WellInfo::named("BH 4"));
    well.add_interval(0.0, 3.0, "Silt", description);
    well
}

#[test]
fn raster_shows_descriptions() {
    let opts = WellPlotOptions {
        dpi: 100.0,
        ..WellPlotOptions::default()
    };
    let styles = StyleTable::standard();
    let firm = plot_well(&described("brown, firm"), &styles, &opts).unwrap();
    let stiff = plot_well(&described("grey, stiff"), &styles, &opts).unwrap();

    let (a, b) = (firm.render_raster().unwrap(), stiff.render_raster().unwrap());
    assert_eq!(a.dimensions(), b.dimensions());
    assert_ne!(a, b);

    let hidden = WellPlotOptions {
        description: false,
        ..opts
    };
    let a = plot_well(&described("brown, firm"), &styles, &hidden).unwrap();
    let b = plot_well(&described("grey, stiff"), &styles, &hidden).unwrap();
    assert_eq!(a.render_raster().unwrap(), b.render_raster().unwrap());
}

#[test]
fn raster_shows_well_names() {
    let opts = SectionOptions {
        dpi: 60.0,
        ..SectionOptions::default()
    };
    let renamed: Vec<Well> = site()
        .into_iter()
        .map(|mut w| {
            w.info.name = w.info.name.replace("BH", "MW");
            w
        })
        .collect();
    let styles = StyleTable::standard();
    let a = plot_section(&site(), &styles, &opts).unwrap().render_raster().unwrap();
    let b = plot_section(&renamed, &styles, &opts).unwrap().render_raster().unwrap();
    assert_eq!(a.dimensions(), b.dimensions());
    assert_ne!(a, b);
}

#[test]
fn oversized_canvas_rejected_before_drawing() {
    let opts = WellPlotOptions {
        dpi: 1e9,
        ..WellPlotOptions::default()
    };
    let err = plot_well(&site()[0], &StyleTable::standard(), &opts).unwrap_err();
    assert!(matches!(err, RenderError::InvalidOptions(_)));
}

#[test]
fn svg_carries_text() {
    let dir = tempfile::tempdir().unwrap();
    let fig = plot_section(&site(), &StyleTable::standard(), &small_section()).unwrap();
    let path = fig.save_svg(dir.path()).unwrap();
    let svg = std::fs::read_to_string(path).unwrap();

    assert!(svg.starts_with("<svg"));
    for needle in ["BH 1", "BH 2", "BH 3", "Easting [m]", "Elevation [m]", "Bedrock", "Cross-section"] {
        assert!(svg.contains(needle), "missing {needle}");
    }
    assert!(svg.contains("rotate(-90.0"));
    assert!(svg.contains("<pattern"));
}
