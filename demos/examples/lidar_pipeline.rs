// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lidar pipeline.
//!
//! Read a las2txt-style text file, build a quadtree over its x/y plane, and
//! answer a k-nearest-neighbour query from the command line.
//!
//! Run:
//! - `cargo run -p thicket_demos --example lidar_pipeline -- cloud.txt 16 250 250`

use std::env;
use std::process::ExitCode;

use thicket_index::{PointIndex, Quadtree};
use thicket_lidar::PointCloud;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let [path, k, x, y] = args.as_slice() else {
        eprintln!("usage: lidar_pipeline <cloud.txt> <k> <x> <y>");
        return ExitCode::FAILURE;
    };
    let (Ok(k), Ok(x), Ok(y)) = (k.parse::<usize>(), x.parse::<f64>(), y.parse::<f64>()) else {
        eprintln!("k must be an integer, x and y must be numbers");
        return ExitCode::FAILURE;
    };

    let cloud = match PointCloud::from_path(path) {
        Ok(cloud) => cloud,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let (x0, x1, y0, y1) = cloud.xy_bounds();
    println!(
        "{} points over x [{x0}, {x1}], y [{y0}, {y1}]",
        cloud.len()
    );

    let mut quadtree = match Quadtree::new(x0, x1, y0, y1) {
        Ok(qt) => qt,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = quadtree.build(cloud.into_points()) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    println!("quadtree holds {} leaves", quadtree.num_leaves());

    match quadtree.query_knn(k, x, y) {
        Ok(hits) => {
            println!("nearest {} to ({x}, {y}), closest last:", hits.len());
            for record in &hits {
                println!("  {:.3} {:.3} {:.3}", record[0], record[1], record[2]);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
