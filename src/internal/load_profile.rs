//! Load profile of both map variants.
//!
//! Streams keys into each map/hash-function pairing, prints the occupancy counters
//! at regular intervals and charts table load and the share of empty buckets
//! against the number of inserts.

#![allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]

use hashbucket::{
    ChainedMap, HashTable, LoadSnapshot, OpenAddressingMap, fill_observed, hash_function_1,
    hash_function_2,
};
use plotters::prelude::*;
use rand::Rng;

/// Keys streamed into every map
const INSERTS: usize = 2_000;
/// Print a row every this many inserts
const REPORT_EVERY: usize = 250;
/// Capacity every map starts with
const INITIAL_CAPACITY: usize = 50;
/// Font used by every chart
const FONT: &str = "sans-serif";

/// One map under measurement and the readings taken after each insert
struct Profile {
    /// Legend label
    name: &'static str,
    /// Line color
    color: RGBColor,
    /// `(inserts so far, reading)` pairs
    readings: Vec<(usize, LoadSnapshot)>,
}

/// Builds the key stream: the sequential `str{i}` keys first, then random ones
/// (which may repeat and turn into overwrites)
fn key_stream() -> Vec<String> {
    let mut rng = rand::rng();
    let half = INSERTS / 2;
    (0..half)
        .map(|i| format!("str{i}"))
        .chain((half..INSERTS).map(|_| format!("rnd{}", rng.random_range(0..5_000_u32))))
        .collect()
}

/// Streams `keys` into `table`, printing a row every `REPORT_EVERY` inserts
fn profile(
    name: &'static str,
    color: RGBColor,
    table: &mut dyn HashTable<usize>,
    keys: &[String],
) -> Profile {
    println!("{name}");
    println!("  {:>7} {:>13} {:>10} {:>8} {:>9}", "inserts", "empty_buckets", "table_load", "size", "capacity");

    let mut readings = Vec::with_capacity(keys.len());
    let pairs = keys.iter().cloned().zip(0_usize..);
    fill_observed(table, pairs, |inserted, reading| {
        if inserted % REPORT_EVERY == 0 {
            println!(
                "  {:>7} {:>13} {:>10.3} {:>8} {:>9}",
                inserted, reading.empty_buckets, reading.table_load, reading.size, reading.capacity
            );
        }
        readings.push((inserted, reading));
    });

    Profile { name, color, readings }
}

/// Draws one line per profile of `metric` against the insert count
fn chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    profiles: &[Profile],
    metric: fn(&LoadSnapshot) -> f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = profiles
        .iter()
        .flat_map(|p| p.readings.iter().map(|(_, reading)| metric(reading)))
        .fold(0.0_f64, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..INSERTS, 0.0..max_y.max(1.0))?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((FONT, 16))
        .draw()?;

    for profile in profiles {
        let line_style = ShapeStyle::from(&profile.color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                profile.readings.iter().map(|(inserted, reading)| (*inserted, metric(reading))),
                line_style,
            ))?
            .label(profile.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Profiles every pairing and renders the charts
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let keys = key_stream();

    let profiles = [
        profile(
            "Open addressing, hash_function_1",
            RGBColor(220, 50, 50),
            &mut OpenAddressingMap::<usize, _>::new(INITIAL_CAPACITY, hash_function_1),
            &keys,
        ),
        profile(
            "Open addressing, hash_function_2",
            RGBColor(50, 90, 220),
            &mut OpenAddressingMap::<usize, _>::new(INITIAL_CAPACITY, hash_function_2),
            &keys,
        ),
        profile(
            "Chaining, hash_function_1",
            RGBColor(50, 180, 50),
            &mut ChainedMap::<usize, _>::new(INITIAL_CAPACITY, hash_function_1),
            &keys,
        ),
        profile(
            "Chaining, hash_function_2",
            RGBColor(180, 50, 180),
            &mut ChainedMap::<usize, _>::new(INITIAL_CAPACITY, hash_function_2),
            &keys,
        ),
    ];

    chart("table_load.png", "Table Load While Inserting", "Entries per Bucket", &profiles, |r| {
        r.table_load
    })?;
    chart(
        "empty_buckets.png",
        "Empty Buckets While Inserting",
        "Share of Empty Buckets",
        &profiles,
        |r| r.empty_buckets as f64 / r.capacity as f64,
    )?;

    println!("Generated plot images: table_load.png, empty_buckets.png");

    Ok(())
}
