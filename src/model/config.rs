use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "UPPERCASE", default)]
pub struct SimulationConfig {
    pub population: usize,

    // Plane the agents wander over, wrapping at the edges
    pub world_width: f32,
    pub world_height: f32,

    // Population-level usage weight, carried for the control
    // surface; exposure reads each agent's own usage trait
    pub social_media_usage_weight: f32,

    // Weights on the survey-derived protective traits
    pub source_checking_rate: f32,
    pub manipulation_awareness: f32,
    pub info_confidence_factor: f32,
    pub critical_thinking_weight: f32,

    // Weights on the survey-derived risk traits
    pub social_media_influence: f32,
    pub echo_chamber_effect: f32,

    // Tie formation
    pub network_density: f32,
    pub homophily_weight: f32,

    // Movement and spatial aggregation
    pub movement_speed: f32,
    pub patch_size: f32,

    // Per-technique weights, reserved for narrative potency
    // modeling; not read by the transition math
    pub emotional_expression_weight: f32,
    pub simplification_weight: f32,
    pub whataboutism_weight: f32,
    pub doubt_smear_weight: f32,
    pub repetition_weight: f32,

    // Weights on the two distrust narratives in belief formation
    pub institutional_distrust_weight: f32,
    pub western_distrust_weight: f32,

    // Renderer highlights agents above this radicalization
    pub radicalization_threshold: f32,

    pub deradicalization_rate: f32,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            population: 400,
            world_width: 550.,
            world_height: 450.,
            social_media_usage_weight: 0.65,
            source_checking_rate: 0.35,
            manipulation_awareness: 0.40,
            social_media_influence: 0.60,
            info_confidence_factor: 0.45,
            echo_chamber_effect: 0.55,
            critical_thinking_weight: 0.70,
            network_density: 0.15,
            homophily_weight: 0.60,
            movement_speed: 2.,
            patch_size: 25.,
            emotional_expression_weight: 0.30,
            simplification_weight: 0.25,
            whataboutism_weight: 0.15,
            doubt_smear_weight: 0.12,
            repetition_weight: 0.10,
            institutional_distrust_weight: 0.48,
            western_distrust_weight: 0.21,
            radicalization_threshold: 0.70,
            deradicalization_rate: 0.03,
        }
    }
}
