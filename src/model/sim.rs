use super::agent::{Agent, Narrative, State};
use super::config::SimulationConfig;
use super::grid::Grid;
use super::network;
use super::stats::{DetailedStats, Stats, TimeSeriesEntry};
use super::survey::RespondentRecord;
use super::util::{chance, clamp01};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

// Radius within which agents actually influence each other.
// Distinct from the stored social graph, which only display
// consumers read.
static INFLUENCE_RADIUS: f32 = 50.;

// Base per-step probabilities of the state machine
static BASE_EXPOSURE: f32 = 0.25;
static BASE_BELIEF: f32 = 0.12;
static BASE_RECOVERY: f32 = 0.04;
static RELAPSE_PROB: f32 = 0.008;

// A believer holds at most this many narratives
static MAX_BELIEVED: usize = 3;

pub struct Simulation {
    pub agents: Vec<Agent>,
    pub grid: Grid,
    pub step: usize,
    pub stats: Stats,
    pub history: Vec<TimeSeriesEntry>,
}

impl Simulation {
    // Setup: build the population (resampling records with
    // replacement when they run short), wire the network, seed
    // believers, and emit the step-0 series entry. Re-setup is
    // constructing a fresh Simulation.
    pub fn new(
        conf: &SimulationConfig,
        records: &Vec<RespondentRecord>,
        mut rng: &mut StdRng,
    ) -> Simulation {
        let mut agents: Vec<Agent> = Vec::with_capacity(conf.population);
        for i in 0..conf.population {
            let record = if records.is_empty() {
                None
            } else if i < records.len() {
                Some(&records[i])
            } else {
                records.choose(&mut rng)
            };
            agents.push(Agent::new(i, record, conf, &mut rng));
        }

        network::build(&mut agents, conf, &mut rng);
        network::seed_believers(&mut agents);

        let grid = Grid::new(conf.world_width, conf.world_height, conf.patch_size);
        let stats = Stats::collect(&agents);
        let history = vec![TimeSeriesEntry {
            step: 0,
            stats: DetailedStats::collect(&agents),
        }];

        Simulation {
            agents: agents,
            grid: grid,
            step: 0,
            stats: stats,
            history: history,
        }
    }

    // One discrete tick. All neighbor reads go against a frozen
    // copy of the post-movement state, so update order cannot
    // bias the outcome; writes land on the live list.
    pub fn step(&mut self, conf: &SimulationConfig, mut rng: &mut StdRng) {
        for a in self.agents.iter_mut() {
            a.wander(conf, &mut rng);
        }

        let snapshot = self.agents.clone();
        for a in self.agents.iter_mut() {
            a.time_in_state += 1;

            let neighbors: Vec<&Agent> = snapshot
                .iter()
                .filter(|b| b.id != a.id && a.distance_to(b) < INFLUENCE_RADIUS)
                .collect();
            let inf = Influence::measure(a, &neighbors);

            a.echo_chamber_score = inf.echo_chamber;
            a.social_capital = clamp01(
                a.social_capital + inf.diversity * 0.01 - inf.believer_count as f32 * 0.005,
            );

            match a.state {
                State::Susceptible => transition_susceptible(a, &inf, conf, &mut rng),
                State::Exposed => transition_exposed(a, &inf, conf, &mut rng),
                State::Believer => transition_believer(a, &inf, conf, &mut rng),
                State::Resistant => transition_resistant(a, &mut rng),
            }
        }

        self.grid.rebuild(&self.agents);
        self.step += 1;
        self.stats = Stats::collect(&self.agents);
        self.history.push(TimeSeriesEntry {
            step: self.step,
            stats: DetailedStats::collect(&self.agents),
        });
    }
}

// Per-agent view of the proximity neighborhood, measured against
// the step-start snapshot. Every denominator is floored at 1.
struct Influence {
    believer_count: usize,
    resistant_count: usize,
    homophily_boost: f32,
    neighbor_influence: f32,
    echo_chamber: f32,
    diversity: f32,
    // Narratives held by neighboring believers, duplicates kept
    circulating: Vec<Narrative>,
}

impl Influence {
    fn measure(a: &Agent, neighbors: &Vec<&Agent>) -> Influence {
        let believers: Vec<&Agent> = neighbors
            .iter()
            .filter(|n| n.state == State::Believer)
            .map(|n| *n)
            .collect();
        let believer_count = believers.len();
        let homophilic = believers.iter().filter(|b| a.homophilic_with(b)).count();
        let resistant_count = neighbors
            .iter()
            .filter(|n| n.state == State::Resistant)
            .count();
        let same_language = neighbors
            .iter()
            .filter(|n| n.mother_tongue == a.mother_tongue)
            .count();

        let n = neighbors.len().max(1) as f32;
        let circulating = believers
            .iter()
            .flat_map(|b| b.believed_narratives.iter().cloned())
            .collect();

        Influence {
            believer_count: believer_count,
            resistant_count: resistant_count,
            homophily_boost: homophilic as f32 / believer_count.max(1) as f32,
            neighbor_influence: believer_count as f32 / n,
            echo_chamber: same_language as f32 / n,
            diversity: (neighbors.len() - same_language) as f32 / n,
            circulating: circulating,
        }
    }
}

fn transition_susceptible(a: &mut Agent, inf: &Influence, conf: &SimulationConfig, rng: &mut StdRng) {
    if inf.believer_count == 0 {
        return;
    }
    let protective = a.manipulation_awareness * conf.manipulation_awareness
        + a.info_confidence * conf.info_confidence_factor
        + a.source_checking * conf.source_checking_rate;
    let risk = a.echo_chamber_tendency * conf.echo_chamber_effect
        + a.social_media_influence * conf.social_media_influence;

    let p = BASE_EXPOSURE
        * a.social_media_time
        * (1. - protective * 0.3)
        * (1. + risk * 0.4)
        * (1. + inf.neighbor_influence * 0.5)
        * (1. + inf.homophily_boost * conf.homophily_weight);

    if chance(p, rng) {
        a.state = State::Exposed;
        a.exposure_count += 1;
        a.time_in_state = 0;
        a.exposed_narratives.extend(inf.circulating.iter().cloned());
    }
}

fn transition_exposed(a: &mut Agent, inf: &Influence, conf: &SimulationConfig, rng: &mut StdRng) {
    let critical_block = a.critical_thinking * conf.critical_thinking_weight;
    let source_block = a.source_checking * conf.source_checking_rate;
    let distrust = a.belief_in(Narrative::DistrustNationalInstitutions)
        * conf.institutional_distrust_weight
        + a.belief_in(Narrative::DistrustWesternInstitutions) * conf.western_distrust_weight;

    let p = BASE_BELIEF
        * (1. - critical_block * 0.5)
        * (1. - source_block * 0.3)
        * (1. + a.mean_narrative_belief() * 0.6)
        * (1. + distrust * 0.4)
        * (1. + inf.neighbor_influence * a.social_media_influence)
        * (1. + inf.homophily_boost * 0.4)
        * f32::min(a.exposure_count as f32 / 3., 1.);

    if chance(p, rng) {
        a.state = State::Believer;
        a.size = 1.5;
        a.time_in_state = 0;
        a.believed_narratives = a
            .exposed_narratives
            .iter()
            .cloned()
            .unique()
            .take(MAX_BELIEVED)
            .collect();
        a.radicalization = clamp01(a.radicalization + 0.15);
        a.institutional_trust = clamp01(a.institutional_trust - 0.1);
    } else if chance(critical_block * 0.15 + source_block * 0.1, rng) {
        // Skepticism won: inoculated rather than converted
        a.state = State::Resistant;
        a.time_in_state = 0;
        a.institutional_trust = clamp01(a.institutional_trust + 0.05);
    }
}

fn transition_believer(a: &mut Agent, inf: &Influence, conf: &SimulationConfig, rng: &mut StdRng) {
    // Recovery odds are fixed at branch entry, before this
    // step's radicalization adjustments
    let recovery = BASE_RECOVERY * a.critical_thinking * a.source_checking * (1. - a.radicalization);

    if a.time_in_state > 20 {
        a.radicalization = clamp01(a.radicalization + 0.02 * (1. - a.critical_thinking));
    }
    if inf.resistant_count > inf.believer_count {
        a.radicalization = clamp01(a.radicalization - conf.deradicalization_rate);
    }

    if chance(recovery, rng) {
        a.state = State::Resistant;
        a.size = 1.;
        a.time_in_state = 0;
        a.radicalization = clamp01(a.radicalization - 0.2);
        a.institutional_trust = clamp01(a.institutional_trust + 0.15);
    }
}

fn transition_resistant(a: &mut Agent, rng: &mut StdRng) {
    // Resistance fades: long-time resistants can relapse
    if a.time_in_state > 50 && chance(RELAPSE_PROB, rng) {
        a.state = State::Susceptible;
        a.time_in_state = 0;
        a.exposed_narratives.clear();
    }
}
