use super::config::SimulationConfig;
use super::survey::{Profile, RespondentRecord};
use nalgebra::{VectorN, U10};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

pub type AgentId = usize;

// One belief score per tracked narrative
pub type BeliefVector = VectorN<f32, U10>;

pub static NARRATIVE_COUNT: usize = 10;

#[derive(Display, EnumIter, PartialEq, Eq, Clone, Copy, Debug, Serialize)]
pub enum State {
    Susceptible,
    Exposed,
    Believer,
    Resistant,
}

// The tracked disinformation storylines. Order matters: belief
// vectors are indexed by discriminant, and the belief formula
// reads the two distrust entries.
#[derive(Display, EnumIter, PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize)]
pub enum Narrative {
    MigrantCrisis,
    WarInUkraine,
    NationalDefamation,
    ArmedForcesDefamation,
    DistrustNationalInstitutions,
    DistrustWesternInstitutions,
    WesternCivilizationEnd,
    EffectiveGovernance,
    WashingtonHegemonyEnd,
    NewWorldOrder,
}

impl Narrative {
    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub respondent_id: Option<u64>,

    // Position on the wrapping plane, heading in degrees
    pub x: f32,
    pub y: f32,
    pub heading: f32,

    pub state: State,

    // Survey-derived traits, fixed at creation, 0-1
    pub social_media_time: f32,
    pub source_checking: f32,
    pub manipulation_awareness: f32,
    pub social_media_influence: f32,
    pub info_confidence: f32,
    pub echo_chamber_tendency: f32,
    pub critical_thinking: f32,

    pub narrative_belief: BeliefVector,

    // Demographic codes; only consumed by homophily and
    // stratified reporting
    pub age_group: u8,
    pub gender: u8,
    pub education: u8,
    pub mother_tongue: u8,
    pub occupation: u8,
    pub income: u8,
    pub marital_status: u8,
    pub location: u8,

    // Mutated by the engine
    pub radicalization: f32,
    pub echo_chamber_score: f32,
    pub social_capital: f32,
    pub institutional_trust: f32,
    pub exposure_count: usize,
    pub time_in_state: usize,
    pub exposed_narratives: Vec<Narrative>,
    pub believed_narratives: Vec<Narrative>,

    // Display size multiplier for the external renderer
    pub size: f32,

    // Social graph out-edges, fixed after setup
    pub connections: Vec<AgentId>,
}

impl Agent {
    pub fn new(
        id: AgentId,
        record: Option<&RespondentRecord>,
        conf: &SimulationConfig,
        mut rng: &mut StdRng,
    ) -> Agent {
        let x = rng.gen::<f32>() * (conf.world_width - 20.) + 10.;
        let y = rng.gen::<f32>() * (conf.world_height - 20.) + 10.;
        let heading = rng.gen::<f32>() * 360.;
        let profile = Profile::resolve(record, &mut rng);

        Agent {
            id: id,
            respondent_id: profile.respondent_id,
            x: x,
            y: y,
            heading: heading,
            state: State::Susceptible,
            social_media_time: profile.social_media_time,
            source_checking: profile.source_checking,
            manipulation_awareness: profile.manipulation_awareness,
            social_media_influence: profile.social_media_influence,
            info_confidence: profile.info_confidence,
            echo_chamber_tendency: profile.echo_chamber_tendency,
            critical_thinking: profile.critical_thinking,
            narrative_belief: BeliefVector::from_vec(profile.narrative_belief),
            age_group: profile.age_group,
            gender: profile.gender,
            education: profile.education,
            mother_tongue: profile.mother_tongue,
            occupation: profile.occupation,
            income: profile.income,
            marital_status: profile.marital_status,
            location: profile.location,
            radicalization: 0.,
            echo_chamber_score: 0.,
            social_capital: 1.,
            institutional_trust: 0.5,
            exposure_count: 0,
            time_in_state: 0,
            exposed_narratives: Vec::new(),
            believed_narratives: Vec::new(),
            size: 1.,
            connections: Vec::new(),
        }
    }

    pub fn mean_narrative_belief(&self) -> f32 {
        self.narrative_belief.iter().sum::<f32>() / NARRATIVE_COUNT as f32
    }

    pub fn belief_in(&self, narrative: Narrative) -> f32 {
        self.narrative_belief[narrative.index()]
    }

    // Random walk with echo-chamber inertia: chamber-bound agents
    // reorient less often.
    pub fn wander(&mut self, conf: &SimulationConfig, rng: &mut StdRng) {
        let turn_p = 0.3 * (1. - 0.5 * self.echo_chamber_tendency);
        if rng.gen::<f32>() < turn_p {
            self.heading += rng.gen_range(-30., 30.);
        }
        let rad = self.heading.to_radians();
        self.x = (self.x + rad.cos() * conf.movement_speed).rem_euclid(conf.world_width);
        self.y = (self.y + rad.sin() * conf.movement_speed).rem_euclid(conf.world_height);
    }

    pub fn distance_to(&self, other: &Agent) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    // Language or adjacent age bracket: the similarity axes that
    // matter for in-step influence
    pub fn homophilic_with(&self, other: &Agent) -> bool {
        self.mother_tongue == other.mother_tongue
            || (self.age_group as i32 - other.age_group as i32).abs() <= 1
    }
}
