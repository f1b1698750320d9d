// File: crates/metric-chart/build.rs
// Summary: Links the Windows system libraries the Skia backend needs for font lookup.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Skia's font manager reads the registry (RegOpenKeyExW, RegQueryInfoKeyW, ...).
        println!("cargo:rustc-link-lib=advapi32");
    }
}
