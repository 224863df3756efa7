// build.rs - Custom build script for optional_value

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OPTIONAL_PIPE_MIN");

    // Generate build information
    generate_build_info();

    // Generate version information
    generate_version_info();
}

fn generate_build_info() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    let git_hash = get_git_hash().unwrap_or_else(|| "unknown".to_string());
    let build_time = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let rustc_version = get_rustc_version().unwrap_or_else(|| "unknown".to_string());
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    let build_info = format!(
        r#"
pub const GIT_HASH: &str = "{}";
pub const BUILD_TIME: &str = "{}";
pub const RUSTC_VERSION: &str = "{}";
pub const TARGET: &str = "{}";
pub const PROFILE: &str = "{}";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
"#,
        git_hash, build_time, rustc_version, target, profile
    );

    fs::write(dest_path, build_info).unwrap();
}

fn generate_version_info() {
    let version = env::var("CARGO_PKG_VERSION").unwrap();
    let major_minor = version.split('.').take(2).collect::<Vec<_>>().join(".");

    println!("cargo:rustc-env=OPTIONAL_VALUE_VERSION_MAJOR_MINOR={}", major_minor);
}

fn get_git_hash() -> Option<String> {
    command_output("git", &["rev-parse", "--short", "HEAD"])
}

fn get_rustc_version() -> Option<String> {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    command_output(&rustc, &["--version"])
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
