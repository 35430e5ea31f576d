//! Game installation tests over synthetic disc trees.

mod common;

use common::{ChunkSpec, FileSpec, build_package};
use pakette_formats::hash::hash_name;
use pakette_storage::toc::{self, TocEntry};
use pakette_storage::{AssetKind, Error, GameFilesystem, PakStream, Region};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

const SERIAL: &str = "SLUS_202.29";

fn sample_files() -> Vec<FileSpec> {
    vec![
        FileSpec::new(
            "text/strings.csv",
            vec![
                ChunkSpec {
                    plain: (0u32..100).map(|v| (v % 251) as u8).collect(),
                    compress: false,
                },
                ChunkSpec {
                    plain: (0u32..4096).map(|v| ((v * 3 + 7) % 256) as u8).collect(),
                    compress: true,
                },
            ],
        ),
        FileSpec::new(
            "models/bike.mdl",
            vec![ChunkSpec {
                plain: vec![0x11; 256],
                compress: true,
            }],
        ),
    ]
}

/// Assemble an installation root. `hashed` stores the toc and the package
/// under their hashed `.DAT` artifact names instead of clear names.
fn install_root(package_name: &str, files: &[FileSpec], hashed: bool) -> TempDir {
    let root = TempDir::new().expect("create temp root");
    for dir in ["DATA", "IRX", "MOVIES", "MUSIC"] {
        fs::create_dir(root.path().join(dir)).expect("create asset dir");
    }
    fs::write(root.path().join(SERIAL), b"boot executable").expect("write serial");

    let built = build_package(files);
    let data = root.path().join("DATA");

    let artifact = |name: &str| {
        if hashed {
            format!("{:X}.DAT", hash_name(name))
        } else {
            name.to_owned()
        }
    };
    fs::write(data.join(artifact(package_name)), &built.bytes).expect("write package");

    let toc_bytes = toc::build(&[TocEntry {
        name: package_name.to_owned(),
        name_hash: hash_name(package_name),
        region: built.region,
    }]);
    fs::write(data.join(artifact("package.toc")), toc_bytes).expect("write toc");

    root
}

#[test]
fn opens_clear_named_installation() {
    let root = install_root("assets.pak", &sample_files(), false);
    let gamefs = GameFilesystem::open(root.path()).unwrap();

    assert_eq!(gamefs.version().region, Region::NtscU);
    assert_eq!(gamefs.packages().len(), 1);
    let region = gamefs.packages()["assets.pak"];
    assert_eq!(region.file_count, 2);
}

#[test]
fn resolves_hashed_artifact_names() {
    let root = install_root("assets.pak", &sample_files(), true);
    let gamefs = GameFilesystem::open(root.path()).unwrap();

    // The resolved path must be the hashed artifact, not the clear name.
    let path = gamefs.asset_path("assets.pak", AssetKind::Data);
    let expected = format!("{:X}.DAT", hash_name("assets.pak"));
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), expected);

    let pak = gamefs.open_package("assets.pak").unwrap();
    assert_eq!(pak.file_count(), 2);
}

#[test]
fn clear_name_is_the_fallback_for_data_assets() {
    let root = install_root("assets.pak", &sample_files(), false);
    let gamefs = GameFilesystem::open(root.path()).unwrap();
    let path = gamefs.asset_path("assets.pak", AssetKind::Data);
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "assets.pak");
}

#[test]
fn non_data_assets_are_always_clear_named() {
    let root = install_root("assets.pak", &sample_files(), false);
    let gamefs = GameFilesystem::open(root.path()).unwrap();
    let path = gamefs.asset_path("intro.pss", AssetKind::Movies);
    assert!(path.ends_with(Path::new("MOVIES").join("intro.pss")));
}

#[test]
fn extracts_a_file_end_to_end() {
    let files = sample_files();
    let expected = files[0].plaintext();
    let root = install_root("assets.pak", &files, true);

    let gamefs = GameFilesystem::open(root.path()).unwrap();
    let mut pak = gamefs.open_package("assets.pak").unwrap();

    let mut stream = PakStream::open(&mut pak, "text/strings.csv").unwrap();
    let mut out = Vec::new();
    stream.read_to_end(&mut out).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn missing_asset_folder_is_not_a_game_root() {
    let root = install_root("assets.pak", &sample_files(), false);
    fs::remove_dir_all(root.path().join("MUSIC")).unwrap();
    assert!(matches!(
        GameFilesystem::open(root.path()),
        Err(Error::NotAGameRoot(_))
    ));
}

#[test]
fn unknown_boot_executable_is_rejected() {
    let root = install_root("assets.pak", &sample_files(), false);
    fs::remove_file(root.path().join(SERIAL)).unwrap();
    assert!(matches!(
        GameFilesystem::open(root.path()),
        Err(Error::UnknownGameVersion(_))
    ));
}

#[test]
fn unlisted_package_cannot_be_opened() {
    let root = install_root("assets.pak", &sample_files(), false);
    let gamefs = GameFilesystem::open(root.path()).unwrap();
    assert!(matches!(
        gamefs.open_package("other.pak"),
        Err(Error::PackageNotFound(_))
    ));
}
