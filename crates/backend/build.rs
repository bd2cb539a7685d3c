//! Puts the workspace `config.toml` next to the backend binary, where
//! `shared::config::load_config` looks for it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn profile_dir(out_dir: &Path, profile: &str) -> Option<PathBuf> {
    // OUT_DIR looks like target/<profile>/build/backend-<hash>/out
    out_dir
        .ancestors()
        .find(|p| p.ends_with(profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let (Ok(out_dir), Ok(profile)) = (env::var("OUT_DIR"), env::var("PROFILE")) else {
        return;
    };
    let Some(target_dir) = profile_dir(Path::new(&out_dir), &profile) else {
        println!("cargo:warning=target/{} not found, config.toml not copied", profile);
        return;
    };

    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !source.exists() {
        println!("cargo:warning=no workspace config.toml, backend runs on defaults");
        return;
    }

    let dest = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source, &dest) {
        println!("cargo:warning=failed to copy config.toml: {}", e);
    }
}
