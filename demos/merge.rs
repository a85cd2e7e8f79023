use addon_config_helper::config::parse_config;
use addon_config_helper::{ConfigSpec, ConfigStore, SpecCache};
use tracing_subscriber::EnvFilter;

const SPEC: &str = r#"
[speech]
    [[espeak]]
        rate = integer(0, 100, default=50)
[sound]
    volume = integer(0, 100, default=100)
    mute = boolean(default=false)
"#;

fn main() -> Result<(), addon_config_helper::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut store = ConfigStore::from_toml_str(
        r#"
        [sound]
        volume = "50"
        "#,
    )?;

    store.merge(&parse_config("[sound]\nmute = \"false\"\n")?)?;
    println!("{}", toml::to_string(store.conf()).unwrap_or_default());

    if let Err(e) = store.merge(&parse_config("[sound]\nvolume = \"80\"\n")?) {
        println!("rejected override: {e}");
    }

    let mut spec = SpecCache::new(ConfigSpec::parse(SPEC)?);
    let value_type = spec.value_type("volume")?.to_string();
    let min = spec.min("volume")?.map(str::to_string);
    let max = spec.max("volume")?.map(str::to_string);
    let default = spec.default("volume")?.map(str::to_string);
    println!("volume: type={value_type} min={min:?} max={max:?} default={default:?}");

    Ok(())
}
