use magi::{Chart, ComparisonMode, EphemerisSettings, Frame, Magnitude, OrbPolicy};
use serde::Deserialize;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct MagiSettings {
    pub ephemeris: EphemerisSettings,
    pub orbs: OrbPolicy,
    pub server: ServerSettings,
    /// Exactly two subjects: the synastry report compares the first with the second.
    pub charts: [Chart; 2],
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    frame: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OrbsToml {
    #[serde(default)]
    natal_major: Option<f64>,
    #[serde(default)]
    natal_minor: Option<f64>,
    #[serde(default)]
    synastry_major: Option<f64>,
    #[serde(default)]
    synastry_minor: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerToml {
    #[serde(default = "default_bind")]
    bind: String,
    #[serde(default = "default_timeout_secs")]
    request_timeout_secs: u64,
}

impl Default for ServerToml {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    name: String,
    date: String,
    time: String,
    utc_offset: f64,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    orbs: OrbsToml,
    #[serde(default)]
    server: ServerToml,
    #[serde(default)]
    charts: Vec<ChartToml>,
}

/// Try `$MAGI_CONFIG`, then the common relative paths for `configs/magi.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    if let Ok(explicit) = env::var("MAGI_CONFIG") {
        return fs::read_to_string(&explicit)
            .map_err(|e| anyhow::anyhow!("Could not read MAGI_CONFIG={}: {e}", explicit));
    }
    let paths = ["configs/magi.toml", "../../configs/magi.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load magi.toml from {:?}", paths);
}

pub fn load_settings() -> anyhow::Result<MagiSettings> {
    let text = read_config_toml_text()?;
    let mut settings = parse_settings(&text)?;
    if let Ok(port) = env::var("PORT") {
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT={port} is not a valid port: {e}"))?;
        settings.server.bind.set_port(port);
    }
    Ok(settings)
}

pub fn parse_settings(text: &str) -> anyhow::Result<MagiSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse magi.toml: {e}"))?;
    let RootConfigToml {
        ephemeris,
        orbs,
        server,
        charts,
    } = root;

    Ok(MagiSettings {
        ephemeris: build_ephemeris(ephemeris)?,
        orbs: build_orbs(&orbs)?,
        server: build_server(server)?,
        charts: build_charts(charts)?,
    })
}

fn build_ephemeris(cfg: EphemerisToml) -> anyhow::Result<EphemerisSettings> {
    let frame = match cfg.frame {
        Some(name) => name
            .parse::<Frame>()
            .map_err(|e| anyhow::anyhow!("ephemeris.frame: {e}"))?,
        None => Frame::default(),
    };
    Ok(EphemerisSettings {
        path: cfg.path.unwrap_or_else(EphemerisSettings::default_path),
        frame,
    })
}

fn build_orbs(cfg: &OrbsToml) -> anyhow::Result<OrbPolicy> {
    let entries = [
        ("natal_major", cfg.natal_major, ComparisonMode::Natal, Magnitude::Major),
        ("natal_minor", cfg.natal_minor, ComparisonMode::Natal, Magnitude::Minor),
        ("synastry_major", cfg.synastry_major, ComparisonMode::Synastry, Magnitude::Major),
        ("synastry_minor", cfg.synastry_minor, ComparisonMode::Synastry, Magnitude::Minor),
    ];
    let mut policy = OrbPolicy::default();
    for (key, value, mode, magnitude) in entries {
        let Some(degrees) = value else { continue };
        if !degrees.is_finite() || !(0.0..=180.0).contains(&degrees) {
            anyhow::bail!("orbs.{key} must be between 0 and 180 degrees, got {degrees}");
        }
        policy = policy.with_orb(mode, magnitude, degrees);
    }
    Ok(policy)
}

fn build_server(cfg: ServerToml) -> anyhow::Result<ServerSettings> {
    let bind: SocketAddr = cfg
        .bind
        .parse()
        .map_err(|e| anyhow::anyhow!("server.bind '{}' is not a socket address: {e}", cfg.bind))?;
    if cfg.request_timeout_secs == 0 {
        anyhow::bail!("server.request_timeout_secs must be at least 1");
    }
    Ok(ServerSettings {
        bind,
        request_timeout: Duration::from_secs(cfg.request_timeout_secs),
    })
}

fn build_charts(charts: Vec<ChartToml>) -> anyhow::Result<[Chart; 2]> {
    let parsed = charts
        .into_iter()
        .map(|c| {
            Chart::parse(&c.name, &c.date, &c.time, c.utc_offset, c.latitude, c.longitude)
                .map_err(|e| anyhow::anyhow!("[[charts]] {e}"))
        })
        .collect::<anyhow::Result<Vec<Chart>>>()?;
    let count = parsed.len();
    <[Chart; 2]>::try_from(parsed)
        .map_err(|_| anyhow::anyhow!("Expected exactly two [[charts]] entries, found {count}"))
}
