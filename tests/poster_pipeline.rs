use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, Rgba};
use posterwall::{Config, LayoutConfig, PosterWorkflow, assemble_column};

fn write_jpg(path: &Path, color: Rgb<u8>, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, color).save(path).unwrap();
}

fn small_layout() -> LayoutConfig {
    LayoutConfig {
        rows: 3,
        cols: 3,
        cell_width: 40,
        cell_height: 60,
        margin: 8,
        corner_radius: 0,
        rotation_angle: 15.0,
        start_x: 900,
        start_y: 100,
        column_spacing: 300,
        save_columns: true,
    }
}

#[test]
fn column_stacks_rows_at_their_slots() {
    let dir = tempfile::tempdir().unwrap();
    let layout = small_layout();

    let colors = [Rgb([220, 30, 30]), Rgb([30, 220, 30]), Rgb([30, 30, 220])];
    let mut paths = Vec::new();
    for (i, color) in colors.iter().enumerate() {
        let p = dir.path().join(format!("{}.jpg", i + 1));
        write_jpg(&p, *color, 100, 150);
        paths.push(p);
    }

    let column = assemble_column(&paths, &layout);
    // Shadow blur radius 20 offsets the cover inside its shadowed layer.
    for (row, color) in colors.iter().enumerate() {
        let cx = 20 + layout.cell_width / 2;
        let cy = row as u32 * (layout.cell_height + layout.margin) + 20 + layout.cell_height / 2;
        let px = column.image.get_pixel(cx, cy);
        assert_eq!(px.0[3], 255, "row {row} center should be opaque");
        // JPEG round-trips approximately; the dominant channel must win.
        let dominant = color.0.iter().enumerate().max_by_key(|(_, v)| **v).unwrap().0;
        let got_dominant = px.0[..3].iter().enumerate().max_by_key(|(_, v)| **v).unwrap().0;
        assert_eq!(got_dominant, dominant, "row {row} color mismatch: {px:?}");
    }
}

#[test]
fn failed_covers_leave_their_slots_empty() {
    let dir = tempfile::tempdir().unwrap();
    let layout = small_layout();

    let p0 = dir.path().join("1.jpg");
    let p2 = dir.path().join("3.jpg");
    write_jpg(&p0, Rgb([200, 40, 40]), 80, 120);
    write_jpg(&p2, Rgb([40, 40, 200]), 80, 120);
    let paths = vec![p0, dir.path().join("missing.jpg"), p2];

    let column = assemble_column(&paths, &layout);

    let center = |row: u32| {
        (
            20 + layout.cell_width / 2,
            row * (layout.cell_height + layout.margin) + 20 + layout.cell_height / 2,
        )
    };

    let (x, y) = center(0);
    assert_eq!(column.image.get_pixel(x, y).0[3], 255);
    let (x, y) = center(2);
    assert_eq!(column.image.get_pixel(x, y).0[3], 255);

    // The middle slot gets no cover; only the neighbor's shadow may reach
    // into it, which is black wherever it is visible.
    let (x, y) = center(1);
    let px = column.image.get_pixel(x, y);
    assert_eq!(&px.0[..3], &[0, 0, 0], "middle slot should hold no cover: {px:?}");
}

#[test]
fn workflow_end_to_end_writes_poster_and_column_intermediates() {
    let root = tempfile::tempdir().unwrap();
    let posters_dir = root.path().join("poster");
    let output_dir = root.path().join("output");
    let library_dir = posters_dir.join("Hot TV");
    std::fs::create_dir_all(&library_dir).unwrap();

    for i in 1..=9 {
        let shade = 40 + i as u8 * 20;
        write_jpg(
            &library_dir.join(format!("{i}.jpg")),
            Rgb([shade, 90, 200u8.saturating_sub(shade)]),
            100,
            150,
        );
    }

    let config = Config {
        posters_dir,
        output_dir: output_dir.clone(),
        layout: small_layout(),
        seed: Some(11),
        ..Config::default()
    };
    let workflow = PosterWorkflow::new(config).unwrap();

    // "Hot TV" has no mapping entry: native falls back to the input name
    // and no english block is drawn.
    let artifacts = workflow.generate("Hot TV").unwrap();
    assert_eq!(artifacts.columns, 3);

    let out = image::open(&artifacts.output_path).unwrap().to_rgba8();
    assert_eq!(out.dimensions(), (1920, 1080));
    // The gradient keeps every pixel opaque.
    assert!(out.pixels().all(|p| p.0[3] == 255));

    let columns_dir = output_dir.join("columns");
    for i in 1..=3 {
        assert!(
            columns_dir
                .join(format!("Hot TV_column_{i}_original.png"))
                .is_file()
        );
        assert!(columns_dir.join(format!("column_{i}_rotated.png")).is_file());
    }

    // Exactly one PNG at the output root.
    let pngs: Vec<PathBuf> = std::fs::read_dir(&output_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "png"))
        .collect();
    assert_eq!(pngs, vec![artifacts.output_path.clone()]);

    // Boolean boundary over the same library.
    assert!(workflow.run("Hot TV"));
}

#[test]
fn workflow_reports_failure_for_empty_library() {
    let root = tempfile::tempdir().unwrap();
    let library_dir = root.path().join("poster").join("Empty");
    std::fs::create_dir_all(&library_dir).unwrap();

    let config = Config {
        posters_dir: root.path().join("poster"),
        output_dir: root.path().join("output"),
        layout: small_layout(),
        ..Config::default()
    };
    let workflow = PosterWorkflow::new(config).unwrap();
    assert!(workflow.generate("Empty").is_err());
    assert!(!workflow.run("Empty"));
}

#[test]
fn excess_covers_are_discarded_not_an_error() {
    let root = tempfile::tempdir().unwrap();
    let library_dir = root.path().join("poster").join("Few");
    std::fs::create_dir_all(&library_dir).unwrap();
    // Only four covers for a 3x3 grid: one full column plus a partial one.
    for i in 1..=4 {
        write_jpg(
            &library_dir.join(format!("{i}.jpg")),
            Rgb([120, 80, 160]),
            60,
            90,
        );
    }

    let config = Config {
        posters_dir: root.path().join("poster"),
        output_dir: root.path().join("output"),
        layout: LayoutConfig {
            save_columns: false,
            ..small_layout()
        },
        seed: Some(5),
        ..Config::default()
    };
    let workflow = PosterWorkflow::new(config).unwrap();
    let artifacts = workflow.generate("Few").unwrap();
    assert_eq!(artifacts.columns, 2);
    assert!(artifacts.output_path.is_file());
    assert!(!root.path().join("output").join("columns").exists());
}

#[test]
fn shadowed_region_blends_into_gradient() {
    // The placed columns must actually darken the background somewhere:
    // pick a pixel straight through the first column's anchor.
    let root = tempfile::tempdir().unwrap();
    let library_dir = root.path().join("poster").join("One");
    std::fs::create_dir_all(&library_dir).unwrap();
    // The gradient reference (2.jpg) is mid-red, so the background carries
    // no near-white pixels of its own; the other covers are near-white.
    for i in 1..=9 {
        let color = if i == 2 { Rgb([150, 60, 60]) } else { Rgb([250, 250, 250]) };
        write_jpg(&library_dir.join(format!("{i}.jpg")), color, 50, 75);
    }

    let config = Config {
        posters_dir: root.path().join("poster"),
        output_dir: root.path().join("output"),
        layout: LayoutConfig {
            save_columns: false,
            start_x: 900,
            start_y: 300,
            ..small_layout()
        },
        seed: Some(2),
        ..Config::default()
    };
    let workflow = PosterWorkflow::new(config).unwrap();
    let artifacts = workflow.generate("One").unwrap();

    let out = image::open(&artifacts.output_path).unwrap().to_rgba8();
    let near_white =
        |p: &Rgba<u8>| p.0[0] > 200 && p.0[1] > 200 && p.0[2] > 200;
    assert!(out.pixels().any(near_white), "covers should appear on the poster");
}
