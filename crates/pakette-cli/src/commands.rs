//! Command implementations

use anyhow::{Context, Result};
use pakette_storage::{GameFilesystem, PakStream};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn info(root: &Path) -> Result<()> {
    let gamefs = open_root(root)?;
    println!("Game version: {}", gamefs.version());
    println!("Packages:");

    let mut packages: Vec<_> = gamefs.packages().iter().collect();
    packages.sort_by(|a, b| a.0.cmp(b.0));
    for (name, region) in packages {
        println!("  {name} ({} files)", region.file_count);
    }
    Ok(())
}

pub fn list(root: &Path, package: &str) -> Result<()> {
    let pak = open_package(root, package)?;

    let mut records: Vec<_> = pak.files().collect();
    records.sort_by(|a, b| a.name.cmp(&b.name));
    for record in records {
        println!(
            "{:#010x} {:>40} {:>10}",
            record.date_stamp,
            record.name,
            human_size(u64::from(record.total_size))
        );
    }
    Ok(())
}

pub fn groups(root: &Path, package: &str) -> Result<()> {
    let pak = open_package(root, package)?;
    for group in pak.groups() {
        println!(
            "{:>24}: {} entries, flags {:#010x}",
            group.name, group.entry_count, group.flags_mask
        );
    }
    Ok(())
}

pub fn extract(root: &Path, package: &str, output: Option<PathBuf>) -> Result<()> {
    let mut pak = open_package(root, package)?;

    let output_root = output.unwrap_or_else(|| {
        Path::new(package)
            .file_stem()
            .map_or_else(|| PathBuf::from("extracted"), PathBuf::from)
    });
    fs::create_dir_all(&output_root)
        .with_context(|| format!("could not create {}", output_root.display()))?;

    let mut names: Vec<String> = pak.files().map(|r| r.name.clone()).collect();
    names.sort_unstable();

    for name in names {
        // Stored paths use backslashes; lay them out as directories.
        let relative = name.replace('\\', "/");
        if relative.split('/').any(|part| part == ".." || part.is_empty()) {
            warn!("skipping {name:?}: not a clean relative path");
            continue;
        }

        let out_path = output_root.join(&relative);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut stream = PakStream::open(&mut pak, &name)
            .with_context(|| format!("could not open {name:?} in {package:?}"))?;
        let mut out = fs::File::create(&out_path)
            .with_context(|| format!("could not create {}", out_path.display()))?;
        io::copy(&mut stream, &mut out)?;

        println!("Extracted {}", out_path.display());
    }
    Ok(())
}

fn open_root(root: &Path) -> Result<GameFilesystem> {
    GameFilesystem::open(root)
        .with_context(|| format!("{} is not a usable game installation", root.display()))
}

fn open_package(root: &Path, package: &str) -> Result<pakette_storage::PakFilesystem> {
    open_root(root)?
        .open_package(package)
        .with_context(|| format!("could not open package {package:?}"))
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
