use super::model::SimulationConfig;
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::BufReader;

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "UPPERCASE")]
pub struct Config {
    #[serde(default)]
    pub steps: usize,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub seed: u64,

    // Optional respondent data, a `{"responses": [...]}` JSON file
    #[serde(default)]
    pub survey: Option<String>,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

pub fn load_config() -> Config {
    let file = File::open("config.yaml").expect("could not open file");
    let reader = BufReader::new(file);
    let mut conf: Config = serde_yaml::from_reader(reader).expect("error while reading yaml");

    conf.steps = match env::var("STEPS") {
        Ok(steps) => steps.parse().unwrap(),
        Err(_) => {
            if conf.steps > 0 {
                conf.steps
            } else {
                100
            }
        }
    };

    conf.debug = match env::var("DEBUG") {
        Ok(debug) => debug == "1",
        Err(_) => conf.debug,
    };

    if let Ok(seed) = env::var("SEED") {
        conf.seed = seed.parse().unwrap();
    }

    println!("{:?}", conf);

    conf
}
