use log::{debug, info};
use serde::Deserialize;
use sidera_core::aspects::{AspectKind, AspectSettings, OrbTable};
use sidera_core::chart::{ChartEngine, EngineSettings};
use sidera_core::compatibility::{default_element_table, default_quality_table, CompatibilityScorer};
use sidera_core::ephemeris::{ranked_candidates, select_backend, BackendPreference, SelectedBackend};
use sidera_core::houses::HouseSystem;
use sidera_core::points::ArabicPart;
use sidera_core::timing::TransitThresholds;
use sidera_core::zodiac::{Ayanamsa, Element, Quality, ZodiacType};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SIDERA_CONFIG";
const DEFAULT_PATHS: [&str; 2] = ["configs/sidera.toml", "../../configs/sidera.toml"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SideraSettings {
    pub engine: EngineSection,
    pub chart: ChartSection,
    pub aspects: AspectSection,
    pub transits: TransitThresholds,
    pub compatibility: CompatibilitySection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    pub backend: BackendPreference,
    /// Swiss Ephemeris data directory; `SWISS_EPHEMERIS_PATH` applies when unset
    pub ephemeris_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChartSection {
    pub house_system: HouseSystem,
    pub zodiac: ZodiacType,
    pub ayanamsa: Ayanamsa,
    /// Arabic parts to compute; all of them when unset
    pub parts: Option<Vec<ArabicPart>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AspectSection {
    pub include_minor: bool,
    /// Orb overrides keyed by aspect name, e.g. `square = 6.0`
    pub orbs: BTreeMap<String, f64>,
}

impl Default for AspectSection {
    fn default() -> Self {
        Self {
            include_minor: true,
            orbs: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairScore<K> {
    pub a: K,
    pub b: K,
    pub score: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompatibilitySection {
    pub elements: Vec<PairScore<Element>>,
    pub qualities: Vec<PairScore<Quality>>,
}

/// Tries `SIDERA_CONFIG` first, then the common relative paths. `Ok(None)` when
/// no file exists; an explicit path that cannot be read is an error.
pub fn read_config_text() -> anyhow::Result<Option<String>> {
    if let Ok(explicit) = env::var(CONFIG_ENV) {
        let text = fs::read_to_string(&explicit)
            .map_err(|e| anyhow::anyhow!("Could not read config from {}={}: {e}", CONFIG_ENV, explicit))?;
        debug!("Loaded config from {}", explicit);
        return Ok(Some(text));
    }
    for p in &DEFAULT_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            debug!("Loaded config from {}", p);
            return Ok(Some(c));
        }
    }
    Ok(None)
}

pub fn parse_settings(text: &str) -> anyhow::Result<SideraSettings> {
    let settings: SideraSettings = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse sidera.toml: {e}"))?;
    settings.validate()?;
    Ok(settings)
}

/// Settings from the first config file found, or defaults when there is none.
pub fn load_settings() -> anyhow::Result<SideraSettings> {
    match read_config_text()? {
        Some(text) => parse_settings(&text),
        None => {
            info!("No sidera.toml found in {:?}; using defaults", DEFAULT_PATHS);
            Ok(SideraSettings::default())
        }
    }
}

fn aspect_kind(name: &str) -> anyhow::Result<AspectKind> {
    AspectKind::ALL
        .iter()
        .copied()
        .find(|k| k.name() == name)
        .ok_or_else(|| anyhow::anyhow!("Unknown aspect in [aspects.orbs]: {name}"))
}

impl SideraSettings {
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, orb) in &self.aspects.orbs {
            aspect_kind(name)?;
            if !orb.is_finite() || *orb < 0.0 {
                anyhow::bail!("Orb for {name} must be a non-negative number, got {orb}");
            }
        }
        let TransitThresholds { active, approaching } = self.transits;
        if !(0.0..=approaching).contains(&active) {
            anyhow::bail!("transits.active ({active}) must be between 0 and transits.approaching ({approaching})");
        }
        let scores = self
            .compatibility
            .elements
            .iter()
            .map(|p| p.score)
            .chain(self.compatibility.qualities.iter().map(|p| p.score));
        for score in scores {
            if !(0.0..=100.0).contains(&score) {
                anyhow::bail!("Compatibility scores must lie in [0, 100], got {score}");
            }
        }
        Ok(())
    }

    pub fn orb_table(&self) -> anyhow::Result<OrbTable> {
        let mut table = OrbTable::default();
        for (name, orb) in &self.aspects.orbs {
            table.set_orb(aspect_kind(name)?, *orb);
        }
        Ok(table)
    }

    pub fn engine_settings(&self) -> anyhow::Result<EngineSettings> {
        Ok(EngineSettings {
            house_system: self.chart.house_system,
            zodiac: self.chart.zodiac,
            ayanamsa: self.chart.ayanamsa,
            aspects: AspectSettings {
                orbs: self.orb_table()?,
                include_minor: self.aspects.include_minor,
            },
            transits: self.transits,
            parts: self
                .chart
                .parts
                .clone()
                .unwrap_or_else(|| ArabicPart::ALL.to_vec()),
        })
    }

    /// Probes the ranked candidates for the configured preference.
    pub fn select_backend(&self) -> SelectedBackend {
        select_backend(ranked_candidates(
            self.engine.backend,
            self.engine.ephemeris_path.clone(),
        ))
    }

    pub fn build_engine(&self) -> anyhow::Result<ChartEngine> {
        Ok(ChartEngine::new(self.select_backend(), self.engine_settings()?))
    }

    /// Default tables with the configured pairs overriding them.
    pub fn compatibility_scorer(&self) -> CompatibilityScorer {
        let mut elements = default_element_table();
        for pair in &self.compatibility.elements {
            elements.insert(pair.a, pair.b, pair.score);
        }
        let mut qualities = default_quality_table();
        for pair in &self.compatibility.qualities {
            qualities.insert(pair.a, pair.b, pair.score);
        }
        CompatibilityScorer::new(elements, qualities)
    }
}
