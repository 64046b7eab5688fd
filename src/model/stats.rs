use super::agent::{Agent, State};
use fnv::FnvHashMap;
use serde::Serialize;

#[derive(Serialize, PartialEq, Clone, Debug, Default)]
pub struct StateCounts {
    pub susceptible: usize,
    pub exposed: usize,
    pub believer: usize,
    pub resistant: usize,
}

impl StateCounts {
    pub fn add(&mut self, state: State) {
        match state {
            State::Susceptible => self.susceptible += 1,
            State::Exposed => self.exposed += 1,
            State::Believer => self.believer += 1,
            State::Resistant => self.resistant += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.susceptible + self.exposed + self.believer + self.resistant
    }
}

// Headline per-step view. Always recomputed from the live agent
// set; nothing is maintained incrementally.
#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct Stats {
    pub susceptible: usize,
    pub exposed: usize,
    pub believer: usize,
    pub resistant: usize,
    pub avg_radicalization: f32,
    pub avg_echo_chamber: f32,
    pub avg_social_capital: f32,
}

impl Stats {
    pub fn collect(agents: &Vec<Agent>) -> Stats {
        let mut counts = StateCounts::default();
        let mut rad = 0.;
        let mut echo = 0.;
        let mut capital = 0.;
        for a in agents {
            counts.add(a.state);
            rad += a.radicalization;
            echo += a.echo_chamber_score;
            capital += a.social_capital;
        }
        let n = agents.len().max(1) as f32;
        Stats {
            susceptible: counts.susceptible,
            exposed: counts.exposed,
            believer: counts.believer,
            resistant: counts.resistant,
            avg_radicalization: rad / n,
            avg_echo_chamber: echo / n,
            avg_social_capital: capital / n,
        }
    }
}

// Detailed view: headline plus demographic strata, appended to
// the time series every step.
#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct DetailedStats {
    pub susceptible: usize,
    pub exposed: usize,
    pub believer: usize,
    pub resistant: usize,
    pub avg_radicalization: f32,
    pub avg_echo_chamber: f32,
    pub avg_social_capital: f32,
    pub avg_institutional_trust: f32,
    pub by_language: FnvHashMap<u8, StateCounts>,
    pub by_education: FnvHashMap<u8, StateCounts>,
    pub by_age: FnvHashMap<u8, StateCounts>,
}

impl DetailedStats {
    pub fn collect(agents: &Vec<Agent>) -> DetailedStats {
        let mut counts = StateCounts::default();
        let mut rad = 0.;
        let mut echo = 0.;
        let mut capital = 0.;
        let mut trust = 0.;
        let mut by_language: FnvHashMap<u8, StateCounts> = FnvHashMap::default();
        let mut by_education: FnvHashMap<u8, StateCounts> = FnvHashMap::default();
        let mut by_age: FnvHashMap<u8, StateCounts> = FnvHashMap::default();
        for a in agents {
            counts.add(a.state);
            rad += a.radicalization;
            echo += a.echo_chamber_score;
            capital += a.social_capital;
            trust += a.institutional_trust;
            by_language.entry(a.mother_tongue).or_insert(StateCounts::default()).add(a.state);
            by_education.entry(a.education).or_insert(StateCounts::default()).add(a.state);
            by_age.entry(a.age_group).or_insert(StateCounts::default()).add(a.state);
        }
        let n = agents.len().max(1) as f32;
        DetailedStats {
            susceptible: counts.susceptible,
            exposed: counts.exposed,
            believer: counts.believer,
            resistant: counts.resistant,
            avg_radicalization: rad / n,
            avg_echo_chamber: echo / n,
            avg_social_capital: capital / n,
            avg_institutional_trust: trust / n,
            by_language: by_language,
            by_education: by_education,
            by_age: by_age,
        }
    }
}

#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct TimeSeriesEntry {
    pub step: usize,
    #[serde(flatten)]
    pub stats: DetailedStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::config::SimulationConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn population(n: usize) -> Vec<Agent> {
        let conf = SimulationConfig::default();
        let mut rng: StdRng = SeedableRng::seed_from_u64(41);
        let mut agents: Vec<Agent> = (0..n).map(|i| Agent::new(i, None, &conf, &mut rng)).collect();
        agents[0].state = State::Believer;
        agents[1].state = State::Exposed;
        agents[2].state = State::Resistant;
        agents
    }

    #[test]
    fn counts_conserve_the_population() {
        let agents = population(40);
        let stats = Stats::collect(&agents);
        assert_eq!(
            stats.susceptible + stats.exposed + stats.believer + stats.resistant,
            40
        );

        let detailed = DetailedStats::collect(&agents);
        let language_total: usize = detailed.by_language.values().map(|c| c.total()).sum();
        assert_eq!(language_total, 40);
    }

    #[test]
    fn averages_match_a_hand_count() {
        let conf = SimulationConfig::default();
        let mut rng: StdRng = SeedableRng::seed_from_u64(43);
        let mut agents: Vec<Agent> = (0..4).map(|i| Agent::new(i, None, &conf, &mut rng)).collect();
        for (i, a) in agents.iter_mut().enumerate() {
            a.radicalization = 0.1 * (i + 1) as f32;
            a.institutional_trust = 0.2;
        }
        let detailed = DetailedStats::collect(&agents);
        assert!((detailed.avg_radicalization - 0.25).abs() < 1e-6);
        assert!((detailed.avg_institutional_trust - 0.2).abs() < 1e-6);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let agents = population(60);
        assert_eq!(Stats::collect(&agents), Stats::collect(&agents));
        assert_eq!(DetailedStats::collect(&agents), DetailedStats::collect(&agents));
    }
}
