use rust_embed::RustEmbed;

/// Embedded catalog and sample fixtures.
/// Path is relative to Cargo.toml location.
#[derive(RustEmbed)]
#[folder = "resources/"]
pub struct Resources;

pub const CATALOG_FILE: &str = "catalog.json";
pub const SEED_FILE: &str = "seed.json";

/// Read an embedded resource as UTF-8 text
pub fn read_text(name: &str) -> Option<String> {
    Resources::get(name).map(|file| String::from_utf8_lossy(&file.data).into_owned())
}
