fn main() {
    // Catalog and seed fixtures are embedded at compile time (relative to Cargo.toml)
    println!("cargo:rerun-if-changed=resources");

    // Also rerun if the build script itself changes
    println!("cargo:rerun-if-changed=build.rs");
}
