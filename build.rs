use std::fs;

fn main() {
    // The bundled config is parsed with `unwrap_or_default`, so catch mistakes here
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    let level = table
        .get("outline")
        .and_then(|outline| outline.get("level"))
        .and_then(|level| level.as_integer());
    if let Some(level) = level {
        if !(1..=2).contains(&level) {
            panic!("default_config.toml: outline.level must be 1 or 2, got {}", level);
        }
    }
}
