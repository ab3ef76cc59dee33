//! Natal and synastry results for a pair of charts, plus their text rendering.

use crate::aspects::{AspectEngine, AspectMatch, ComparisonMode};
use crate::chart::Chart;
use crate::error::MagiError;
use crate::positions::{PositionMap, PositionResolver};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct ChartReport {
    pub chart: Chart,
    pub positions: PositionMap,
    pub natal_aspects: Vec<AspectMatch>,
}

impl ChartReport {
    pub fn compute(
        resolver: &PositionResolver,
        engine: &AspectEngine,
        chart: &Chart,
    ) -> Result<Self, MagiError> {
        let positions = resolver.resolve(chart)?;
        let natal_aspects = engine.natal(&positions);
        Ok(Self {
            chart: chart.clone(),
            positions,
            natal_aspects,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SynastryReport {
    pub first: ChartReport,
    pub second: ChartReport,
    pub synastry_aspects: Vec<AspectMatch>,
    pub natal_orb: f64,
    pub synastry_orb: f64,
}

impl SynastryReport {
    /// Resolve both charts, match each one natally, then match across them.
    pub fn compute(
        resolver: &PositionResolver,
        engine: &AspectEngine,
        first: &Chart,
        second: &Chart,
    ) -> Result<Self, MagiError> {
        let first = ChartReport::compute(resolver, engine, first)?;
        let second = ChartReport::compute(resolver, engine, second)?;
        let synastry_aspects = engine.synastry(&first.positions, &second.positions);
        log::debug!(
            "{} / {}: {} + {} natal, {} synastry aspects",
            first.chart.name,
            second.chart.name,
            first.natal_aspects.len(),
            second.natal_aspects.len(),
            synastry_aspects.len()
        );

        Ok(Self {
            first,
            second,
            synastry_aspects,
            natal_orb: engine.orb_for(ComparisonMode::Natal),
            synastry_orb: engine.orb_for(ComparisonMode::Synastry),
        })
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

/// Orbs print as written in the configuration, keeping one decimal for whole degrees.
struct OrbLabel(f64);

impl fmt::Display for OrbLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn write_positions(f: &mut fmt::Formatter<'_>, report: &ChartReport) -> fmt::Result {
    writeln!(f, "\nPlanetary Positions for {}:", report.chart.name)?;
    for (body, pos) in &report.positions {
        write!(f, "  {:<10}: {:>7.3}°", body.name(), pos.longitude)?;
        if pos.degraded {
            write!(f, " (ephemeris unavailable)")?;
        } else if !pos.rx_label.is_empty() {
            write!(f, " {}", pos.rx_label)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_aspect_detail(f: &mut fmt::Formatter<'_>, aspect: &AspectMatch) -> fmt::Result {
    writeln!(
        f,
        "({}, {}, Orb: {:.2}°) [{}]",
        aspect.aspect_name, aspect.aspect_class, aspect.deviation, aspect.dimension
    )
}

fn write_natal(f: &mut fmt::Formatter<'_>, report: &ChartReport, orb: f64) -> fmt::Result {
    writeln!(f, "\nNatal Aspects for {} (Orb: {}°):", report.chart.name, OrbLabel(orb))?;
    if report.natal_aspects.is_empty() {
        return writeln!(f, "  No natal aspects found within the defined orbs.");
    }
    for aspect in &report.natal_aspects {
        write!(
            f,
            "  {:<10} {} {:<10} ",
            aspect.body1.name(),
            aspect.symbol,
            aspect.body2.name()
        )?;
        write_aspect_detail(f, aspect)?;
    }
    Ok(())
}

impl fmt::Display for SynastryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name1 = &self.first.chart.name;
        let name2 = &self.second.chart.name;

        writeln!(f, "--- Magi Astrology Report ---")?;
        writeln!(f, "Chart 1: {} ({})", name1, self.first.chart.date)?;
        writeln!(f, "Chart 2: {} ({})", name2, self.second.chart.date)?;
        writeln!(f, "--------------------------")?;

        write_positions(f, &self.first)?;
        write_positions(f, &self.second)?;

        write_natal(f, &self.first, self.natal_orb)?;
        write_natal(f, &self.second, self.natal_orb)?;

        writeln!(
            f,
            "\nSynastry Aspects between {} and {} (Orb: {}°):",
            name1,
            name2,
            OrbLabel(self.synastry_orb)
        )?;
        if self.synastry_aspects.is_empty() {
            return writeln!(f, "  No synastry aspects found within the defined orbs.");
        }
        for aspect in &self.synastry_aspects {
            write!(
                f,
                "  {}'s {:<10} {} {}'s {:<10} ",
                name1,
                aspect.body1.name(),
                aspect.symbol,
                name2,
                aspect.body2.name()
            )?;
            write_aspect_detail(f, aspect)?;
        }
        Ok(())
    }
}
