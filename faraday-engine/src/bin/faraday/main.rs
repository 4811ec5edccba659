//! Faraday: catalog cross-matching and neighborhood statistics CLI
//!
//! Loads a galaxy catalog and a rotation measure catalog, runs a
//! sequence of session commands against them, and caches binary
//! snapshots so later invocations skip ingestion.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use faraday_catalog::{
    attach_distances, load_catalog, load_galaxy_catalog, load_rm_catalog, save_catalog, Catalog,
    CatalogKind,
};
use faraday_engine::commands::save::{GALAXY_SNAPSHOT, SOURCE_SNAPSHOT};
use faraday_engine::commands::{self, CommandOutput};
use faraday_engine::progress::ProgressSnapshot;
use faraday_engine::session::Session;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let galaxies = load_or_ingest_galaxies(&cli)?;
    let sources = load_or_ingest_sources(&cli)?;
    if cli.verbose {
        eprintln!("Galaxies: {} records", galaxies.len());
        eprintln!("Sources: {} records", sources.len());
    }

    let mut session = Session::new(galaxies, sources);
    let progress = (!cli.no_progress).then(create_progress_bar);
    if let Some(bar) = &progress {
        let bar = bar.clone();
        session.observer = Some(Box::new(move |snapshot: ProgressSnapshot| {
            if bar.length() != Some(snapshot.total as u64) {
                bar.set_length(snapshot.total as u64);
            }
            bar.set_position(snapshot.completed as u64);
        }));
    }

    if cli.commands.is_empty() {
        print_output(commands::dispatch(&mut session, "HELP")?);
        return Ok(());
    }

    for line in &cli.commands {
        match commands::dispatch(&mut session, line) {
            Ok(output) => print_output(output),
            Err(e) => {
                if let Some(bar) = &progress {
                    bar.finish_and_clear();
                }
                return Err(e).with_context(|| format!("command {:?}", line));
            }
        }
    }
    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }
    Ok(())
}

fn load_or_ingest_galaxies(cli: &Cli) -> anyhow::Result<Catalog> {
    let snapshot = cli.workdir.join(GALAXY_SNAPSHOT);
    if let Some(path) = &cli.galaxies {
        let mut catalog = load_galaxy_catalog(path)?;
        if let Some(distances) = &cli.distances {
            attach_distances(&mut catalog, distances)?;
        }
        catalog.finalize_geometry();
        write_snapshot(&cli.workdir, &snapshot, &catalog)?;
        Ok(catalog)
    } else if snapshot.exists() {
        expect_kind(load_catalog(&snapshot)?, CatalogKind::Galaxy, &snapshot)
    } else {
        eprintln!("No galaxy table or snapshot found; starting with an empty catalog");
        Ok(Catalog::new(CatalogKind::Galaxy))
    }
}

fn load_or_ingest_sources(cli: &Cli) -> anyhow::Result<Catalog> {
    let snapshot = cli.workdir.join(SOURCE_SNAPSHOT);
    if let Some(path) = &cli.sources {
        let mut catalog = load_rm_catalog(path)?;
        catalog.finalize_geometry();
        write_snapshot(&cli.workdir, &snapshot, &catalog)?;
        Ok(catalog)
    } else if snapshot.exists() {
        expect_kind(
            load_catalog(&snapshot)?,
            CatalogKind::RotationMeasure,
            &snapshot,
        )
    } else {
        eprintln!("No source table or snapshot found; starting with an empty catalog");
        Ok(Catalog::new(CatalogKind::RotationMeasure))
    }
}

fn expect_kind(catalog: Catalog, kind: CatalogKind, path: &Path) -> anyhow::Result<Catalog> {
    if catalog.kind != kind {
        anyhow::bail!(
            "{:?} holds a {} snapshot, expected {}",
            path,
            catalog.kind.name(),
            kind.name()
        );
    }
    Ok(catalog)
}

fn write_snapshot(workdir: &Path, path: &Path, catalog: &Catalog) -> anyhow::Result<()> {
    fs::create_dir_all(workdir).with_context(|| format!("creating {:?}", workdir))?;
    save_catalog(catalog, path)
}

fn create_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}

fn print_output(output: CommandOutput) {
    match output {
        CommandOutput::Text(s) => println!("{}", s),
        CommandOutput::Table { headers, rows } => print_table(&headers, &rows),
        CommandOutput::None => {}
    }
}

fn print_table(headers: &[String], rows: &[Vec<String>]) {
    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            let hw = headers[i].len();
            let rw = rows
                .iter()
                .map(|r| r.get(i).map_or(0, |s| s.len()))
                .max()
                .unwrap_or(0);
            hw.max(rw)
        })
        .collect();

    for (i, h) in headers.iter().enumerate() {
        print!("{:<width$}  ", h, width = widths[i]);
    }
    println!();

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            print!("{:<width$}  ", cell, width = widths[i]);
        }
        println!();
    }
}
