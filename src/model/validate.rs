use super::stats::TimeSeriesEntry;
use fnv::FnvHashMap;
use serde::Serialize;

// Trend deltas are measured from this entry, past the initial
// transient, to the latest one.
static EARLY_ENTRY: usize = 5;
static MIN_SERIES: usize = 10;

#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct LanguageRates {
    pub believer_rate: f32,
    pub resistant_rate: f32,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct Validation {
    pub believer_growth_rate: f32,
    pub resistant_formation_rate: f32,
    pub radicalization_trend: f32,
    pub echo_chamber_trend: f32,
    pub social_capital_trend: f32,
    pub by_language: FnvHashMap<u8, LanguageRates>,
}

// None until the series is long enough to say anything.
pub fn validate(history: &Vec<TimeSeriesEntry>) -> Option<Validation> {
    if history.len() <= MIN_SERIES {
        return None;
    }
    let early = &history[EARLY_ENTRY].stats;
    let late = &history[history.len() - 1].stats;

    let mut by_language = FnvHashMap::default();
    for (lang, counts) in late.by_language.iter() {
        let total = counts.total().max(1) as f32;
        by_language.insert(
            *lang,
            LanguageRates {
                believer_rate: counts.believer as f32 / total * 100.,
                resistant_rate: counts.resistant as f32 / total * 100.,
            },
        );
    }

    Some(Validation {
        believer_growth_rate: (late.believer as f32 - early.believer as f32)
            / early.believer.max(1) as f32
            * 100.,
        resistant_formation_rate: (late.resistant as f32 - early.resistant as f32)
            / early.resistant.max(1) as f32
            * 100.,
        radicalization_trend: (late.avg_radicalization - early.avg_radicalization) * 100.,
        echo_chamber_trend: (late.avg_echo_chamber - early.avg_echo_chamber) * 100.,
        social_capital_trend: (late.avg_social_capital - early.avg_social_capital) * 100.,
        by_language: by_language,
    })
}
