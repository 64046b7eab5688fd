use super::agent::{Agent, AgentId, State};
use super::config::SimulationConfig;
use rand::rngs::StdRng;
use rand::Rng;

// Demographic similarity weights for tie formation
static LANGUAGE_WEIGHT: f32 = 0.4;
static AGE_WEIGHT: f32 = 0.3;
static EDUCATION_WEIGHT: f32 = 0.2;
static LOCATION_WEIGHT: f32 = 0.1;

// Mean narrative belief above which an agent enters the
// scenario already convinced
static SEED_BELIEF_THRESHOLD: f32 = 0.7;

pub fn homophily(a: &Agent, b: &Agent) -> f32 {
    let mut sim = 0.;
    if a.mother_tongue == b.mother_tongue {
        sim += LANGUAGE_WEIGHT;
    }
    if (a.age_group as i32 - b.age_group as i32).abs() <= 1 {
        sim += AGE_WEIGHT;
    }
    if a.education == b.education {
        sim += EDUCATION_WEIGHT;
    }
    if a.location == b.location {
        sim += LOCATION_WEIGHT;
    }
    sim
}

// One Bernoulli trial per ordered pair, so the relation is not
// symmetrized. O(N^2), the dominant setup cost.
pub fn build(agents: &mut Vec<Agent>, conf: &SimulationConfig, rng: &mut StdRng) {
    let mut connections: Vec<Vec<AgentId>> = Vec::with_capacity(agents.len());
    for a in agents.iter() {
        let mut edges = Vec::new();
        for b in agents.iter() {
            if a.id == b.id {
                continue;
            }
            let h = homophily(a, b) * conf.homophily_weight;
            let p = conf.network_density * (1. + h);
            if rng.gen::<f32>() < p {
                edges.push(b.id);
            }
        }
        connections.push(edges);
    }
    for (a, edges) in agents.iter_mut().zip(connections) {
        a.connections = edges;
    }
}

// Agents who arrive already convinced seed the epidemic.
pub fn seed_believers(agents: &mut Vec<Agent>) {
    for a in agents.iter_mut() {
        if a.mean_narrative_belief() > SEED_BELIEF_THRESHOLD {
            a.state = State::Believer;
            a.size = 1.5;
            a.radicalization = 0.3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    // Two demographic blocs split by language and distant age,
    // sharing education and location.
    fn two_bloc_population(n: usize, conf: &SimulationConfig, rng: &mut StdRng) -> Vec<Agent> {
        (0..n)
            .map(|i| {
                let mut a = Agent::new(i, None, conf, rng);
                if i % 2 == 0 {
                    a.mother_tongue = 1;
                    a.age_group = 1;
                } else {
                    a.mother_tongue = 7;
                    a.age_group = 6;
                }
                a.education = 2;
                a.location = 1;
                a
            })
            .collect()
    }

    fn same_language_fraction(conf: &SimulationConfig, seed: u64) -> f32 {
        let mut rng: StdRng = SeedableRng::seed_from_u64(seed);
        let mut same = 0usize;
        let mut total = 0usize;
        for _ in 0..20 {
            let mut agents = two_bloc_population(40, conf, &mut rng);
            build(&mut agents, conf, &mut rng);
            for a in &agents {
                for b in &a.connections {
                    total += 1;
                    if agents[*b].mother_tongue == a.mother_tongue {
                        same += 1;
                    }
                }
            }
        }
        same as f32 / total.max(1) as f32
    }

    #[test]
    fn homophily_weight_concentrates_same_language_ties() {
        let mut low = SimulationConfig::default();
        low.homophily_weight = 0.;
        let mut high = SimulationConfig::default();
        high.homophily_weight = 1.;

        assert!(same_language_fraction(&high, 7) > same_language_fraction(&low, 7));
    }

    #[test]
    fn no_self_edges_and_zero_density_means_no_edges() {
        let mut conf = SimulationConfig::default();
        let mut rng: StdRng = SeedableRng::seed_from_u64(21);
        let mut agents = two_bloc_population(30, &conf, &mut rng);
        build(&mut agents, &conf, &mut rng);
        for a in &agents {
            assert!(!a.connections.contains(&a.id));
        }

        conf.network_density = 0.;
        let mut agents = two_bloc_population(30, &conf, &mut rng);
        build(&mut agents, &conf, &mut rng);
        assert!(agents.iter().all(|a| a.connections.is_empty()));
    }

    #[test]
    fn convinced_arrivals_seed_as_believers() {
        let conf = SimulationConfig::default();
        let mut rng: StdRng = SeedableRng::seed_from_u64(23);
        let mut agents = vec![
            Agent::new(0, None, &conf, &mut rng),
            Agent::new(1, None, &conf, &mut rng),
        ];
        agents[0].narrative_belief = agents[0].narrative_belief.map(|_| 0.9);
        agents[1].narrative_belief = agents[1].narrative_belief.map(|_| 0.2);

        seed_believers(&mut agents);
        assert_eq!(agents[0].state, State::Believer);
        assert_eq!(agents[0].size, 1.5);
        assert_eq!(agents[0].radicalization, 0.3);
        assert_eq!(agents[1].state, State::Susceptible);
    }
}
