// File: crates/race-core/build.rs
// Summary: Build script to link required Windows system libraries for Skia/ICU.

fn main() {
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW and friends, pulled in by Skia's font manager.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
