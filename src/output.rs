use super::config::Config;
use super::model::{validate, AgentId, DetailedStats, Narrative, Simulation};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde_json::{json, Value};
use std::fs;
use std::os::unix::fs::symlink;
use std::path::Path;
use strum::IntoEnumIterator;

pub struct Recorder {
    // Agents whose full profiles go into the export
    sample: Vec<AgentId>,
}

impl Recorder {
    pub fn new(sim: &Simulation, mut rng: &mut StdRng) -> Recorder {
        let sample_size = 10;
        let sample: Vec<AgentId> = sim
            .agents
            .choose_multiple(&mut rng, sample_size)
            .map(|a| a.id)
            .collect();
        Recorder { sample: sample }
    }

    fn profiles(&self, sim: &Simulation) -> Vec<Value> {
        self.sample
            .iter()
            .map(|id| {
                let a = &sim.agents[*id];
                json!({
                    "id": a.id,
                    "respondent_id": a.respondent_id,
                    "state": a.state.to_string(),
                    "mother_tongue": a.mother_tongue,
                    "education": a.education,
                    "critical_thinking": a.critical_thinking,
                    "radicalization": a.radicalization,
                    "narrative_belief": a.narrative_belief,
                    "believed_narratives": a.believed_narratives.iter()
                        .map(|n| n.to_string())
                        .collect::<Vec<String>>(),
                })
            })
            .collect()
    }

    pub fn save(&self, sim: &Simulation, conf: &Config, n_respondents: usize) {
        let now: DateTime<Utc> = Utc::now();
        let now_str = now.format("%Y.%m.%d.%H.%M.%S").to_string();
        let results = json!({
            "meta": {
                "seed": conf.seed,
                "steps": conf.steps,
                "population": conf.simulation.population,
                "data_source": if n_respondents > 0 { "survey" } else { "synthetic" },
                "respondents": n_respondents,
                "narratives": Narrative::iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<String>>(),
            },
            "parameters": conf.simulation,
            "time_series": sim.history,
            "final_stats": DetailedStats::collect(&sim.agents),
            "validation": validate(&sim.history),
            "agent_profiles": self.profiles(sim),
        })
        .to_string();

        let dir = format!("runs/{}", now_str);
        let fname = format!("runs/{}/output.json", now_str);

        let path = Path::new(&dir);
        let run_path = Path::new(&now_str);
        let latest_path = Path::new("runs/latest");
        fs::create_dir_all(path).unwrap();
        fs::write(fname, results).expect("Unable to write file");
        if latest_path.exists() {
            fs::remove_file(latest_path).unwrap();
        }
        symlink(run_path, latest_path).unwrap();

        let conf_path = Path::join(path, Path::new("config.yaml"));
        fs::copy(Path::new("config.yaml"), conf_path).unwrap();
        println!("Wrote output to {:?}", path);
    }
}
