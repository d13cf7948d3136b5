use waymark::{
    init_logging, EditorSnapshot, HeadlessSurface, MapEditor, SettingsPersistence, BUILD_DATE,
    VERSION,
};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("Waymark {} (built {})", VERSION, BUILD_DATE);

    let settings = SettingsPersistence::in_config_dir()?.load_or_default()?;
    let editor = MapEditor::new(HeadlessSurface::new(), settings.config())?;

    let snapshot = EditorSnapshot::capture(&editor);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
